//! Contact message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for the public contact form.
#[derive(Debug, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}
