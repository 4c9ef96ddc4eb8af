//! Restaurant event model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// DTO for updating an event. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Query parameters for the public events listing.
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    /// Restrict to upcoming events (default: true).
    pub upcoming: Option<bool>,
}
