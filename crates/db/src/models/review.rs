//! Guest review model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `reviews` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: DbId,
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
    pub is_approved: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
}

/// DTO for the public review submission form.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
}

/// Query parameters for the admin review listing.
#[derive(Debug, Deserialize)]
pub struct ReviewListParams {
    /// `pending`, `approved`, or `all` (default: `pending`).
    pub status: Option<String>,
}
