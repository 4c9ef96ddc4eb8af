//! Route definitions for the public site: menu, reservations, gallery,
//! events, contact, reviews, search, and stats.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{categories, events, gallery, menu, messages, reservations, reviews, stats};
use crate::state::AppState;

/// Public routes merged directly under `/api/v1`.
///
/// ```text
/// GET  /menu                        available items
/// GET  /menu/{id}                   single available item
/// GET  /categories                  active categories with item counts
/// GET  /reviews                     approved reviews + average rating
/// POST /reviews                     submit a review for moderation
/// GET  /events                      active events (?upcoming=false for all)
/// GET  /gallery                     active gallery images
/// GET  /search                      menu search (?q=)
/// GET  /stats                       public aggregate stats
/// POST /contact                     contact form
/// POST /reservations                submit a reservation
/// GET  /reservations/availability   slot availability check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(menu::list_public))
        .route("/menu/{id}", get(menu::get_public))
        .route("/categories", get(categories::list_public))
        .route(
            "/reviews",
            get(reviews::list_public).post(reviews::submit),
        )
        .route("/events", get(events::list_public))
        .route("/gallery", get(gallery::list_public))
        .route("/search", get(menu::search))
        .route("/stats", get(stats::get))
        .route("/contact", post(messages::submit))
        .route("/reservations", post(reservations::submit))
        .route(
            "/reservations/availability",
            get(reservations::check_availability),
        )
}
