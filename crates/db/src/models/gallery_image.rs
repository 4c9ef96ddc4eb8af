//! Gallery image model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `gallery_images` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryImage {
    pub id: DbId,
    pub title: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Insert payload for a gallery image; the image URL comes from the
/// upload step, not the client.
#[derive(Debug)]
pub struct CreateGalleryImage {
    pub title: Option<String>,
    pub image_url: String,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

/// DTO for updating gallery image metadata.
#[derive(Debug, Deserialize)]
pub struct UpdateGalleryImage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
