//! Menu category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Category with the number of available menu items it contains, for the
/// public categories listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub item_count: i64,
}

/// DTO for creating a new category. The slug is derived server-side.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
