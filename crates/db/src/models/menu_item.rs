//! Menu item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `menu_items` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MenuItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: DbId,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
    pub allergens: Option<String>,
    pub preparation_time: Option<i32>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new menu item.
#[derive(Debug, Deserialize)]
pub struct CreateMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: DbId,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub allergens: Option<String>,
    pub preparation_time: Option<i32>,
    pub display_order: Option<i32>,
}

/// DTO for updating a menu item. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateMenuItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<DbId>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub allergens: Option<String>,
    pub preparation_time: Option<i32>,
    pub display_order: Option<i32>,
}

/// Query parameters for the public menu listing.
#[derive(Debug, Deserialize)]
pub struct MenuListParams {
    pub category_id: Option<DbId>,
    pub featured: Option<bool>,
}
