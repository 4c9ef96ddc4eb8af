//! Public statistics endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use tavola_core::review::round_rating;
use tavola_db::repositories::{EventRepo, MenuItemRepo, ReviewRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Aggregate numbers shown on the public site.
#[derive(Debug, Serialize)]
pub struct PublicStats {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub total_menu_items: i64,
    pub upcoming_events: i64,
}

/// GET /stats
pub async fn get(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let total_reviews = ReviewRepo::count_approved(&state.pool).await?;
    let average_rating = ReviewRepo::average_rating(&state.pool).await?.unwrap_or(0.0);
    let total_menu_items = MenuItemRepo::count_available(&state.pool).await?;
    let upcoming_events = EventRepo::count_upcoming(&state.pool, Utc::now()).await?;

    Ok(Json(DataResponse {
        data: PublicStats {
            total_reviews,
            average_rating: round_rating(average_rating),
            total_menu_items,
            upcoming_events,
        },
    }))
}
