//! Route definitions for the staff back-office.
//!
//! Every handler here requires a Bearer token; destructive operations
//! additionally require the `admin` role (enforced in the handlers).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    categories, dashboard, events, gallery, menu, messages, reservations, reviews,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard                 headline counts + recent activity
///
/// GET    /reservations              list (?status=&date=&limit=&offset=)
/// GET    /reservations/{id}         get
/// PUT    /reservations/{id}/status  set status (may notify the guest)
/// DELETE /reservations/{id}         hard delete (admin role)
///
/// GET    /menu                      list all items
/// POST   /menu                      create item
/// PUT    /menu/{id}                 update item
/// DELETE /menu/{id}                 delete item (admin role)
/// POST   /menu/{id}/image           upload item photo (multipart)
///
/// GET    /categories                list
/// POST   /categories                create
/// PUT    /categories/{id}           update
/// DELETE /categories/{id}           delete (admin role; refused with items)
///
/// GET    /gallery                   list all images
/// POST   /gallery                   add image (multipart)
/// PUT    /gallery/{id}              update metadata
/// DELETE /gallery/{id}              delete (admin role)
///
/// GET    /reviews                   list (?status=pending|approved|all)
/// POST   /reviews/{id}/approve      approve for publication
/// POST   /reviews/{id}/feature      toggle featured flag
/// DELETE /reviews/{id}              delete
///
/// GET    /events                    list all events
/// POST   /events                    create
/// PUT    /events/{id}               update
/// DELETE /events/{id}               delete (admin role)
/// POST   /events/{id}/image         upload event photo (multipart)
///
/// GET    /messages                  list contact messages
/// POST   /messages/{id}/read        mark read
/// DELETE /messages/{id}             delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get))
        // Reservations.
        .route("/reservations", get(reservations::list))
        .route(
            "/reservations/{id}",
            get(reservations::get_by_id).delete(reservations::delete),
        )
        .route("/reservations/{id}/status", put(reservations::update_status))
        // Menu.
        .route("/menu", get(menu::list_admin).post(menu::create))
        .route("/menu/{id}", put(menu::update).delete(menu::delete))
        .route("/menu/{id}/image", post(menu::upload_image))
        // Categories.
        .route(
            "/categories",
            get(categories::list_admin).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
        // Gallery.
        .route("/gallery", get(gallery::list_admin).post(gallery::create))
        .route(
            "/gallery/{id}",
            put(gallery::update).delete(gallery::delete),
        )
        // Reviews.
        .route("/reviews", get(reviews::list_admin))
        .route("/reviews/{id}/approve", post(reviews::approve))
        .route("/reviews/{id}/feature", post(reviews::toggle_featured))
        .route("/reviews/{id}", delete(reviews::delete))
        // Events.
        .route("/events", get(events::list_admin).post(events::create))
        .route("/events/{id}", put(events::update).delete(events::delete))
        .route("/events/{id}/image", post(events::upload_image))
        // Contact messages.
        .route("/messages", get(messages::list))
        .route("/messages/{id}/read", post(messages::mark_read))
        .route("/messages/{id}", delete(messages::delete))
}
