//! Admin dashboard: headline counts plus recent activity.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use serde::Serialize;

use tavola_core::booking::STATUS_PENDING;
use tavola_db::models::contact_message::ContactMessage;
use tavola_db::models::reservation::Reservation;
use tavola_db::repositories::{ContactMessageRepo, MenuItemRepo, ReservationRepo, ReviewRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of recent reservations / messages shown on the dashboard.
const RECENT_LIMIT: i64 = 5;

/// Number of upcoming confirmed reservations shown on the dashboard.
const UPCOMING_LIMIT: i64 = 10;

/// Headline counts for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_reservations: i64,
    pub pending_reservations: i64,
    pub total_menu_items: i64,
    pub pending_reviews: i64,
    pub unread_messages: i64,
}

/// Full dashboard payload.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_reservations: Vec<Reservation>,
    pub upcoming_reservations: Vec<Reservation>,
    pub recent_messages: Vec<ContactMessage>,
}

/// GET /admin/dashboard
pub async fn get(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;

    let stats = DashboardStats {
        total_reservations: ReservationRepo::count_all(pool).await?,
        pending_reservations: ReservationRepo::count_by_status(pool, STATUS_PENDING).await?,
        total_menu_items: MenuItemRepo::count_all(pool).await?,
        pending_reviews: ReviewRepo::count_pending(pool).await?,
        unread_messages: ContactMessageRepo::count_unread(pool).await?,
    };

    let today = Local::now().date_naive();
    let dashboard = Dashboard {
        stats,
        recent_reservations: ReservationRepo::list_recent(pool, RECENT_LIMIT).await?,
        upcoming_reservations: ReservationRepo::list_upcoming_confirmed(pool, today, UPCOMING_LIMIT)
            .await?,
        recent_messages: ContactMessageRepo::list_recent(pool, RECENT_LIMIT).await?,
    };

    Ok(Json(DataResponse { data: dashboard }))
}
