//! Reservation entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tavola_core::types::{DbId, Timestamp};

/// A row from the `reservations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reservation {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Typed insert payload, built by the engine after validation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub special_requests: Option<String>,
}

/// Query parameters for the admin reservation listing.
#[derive(Debug, Deserialize)]
pub struct ReservationListParams {
    pub status: Option<String>,
    pub date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
