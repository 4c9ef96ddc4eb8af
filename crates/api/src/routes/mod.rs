pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
///
/// /menu                             available items (public)
/// /menu/{id}                        single item (public)
/// /categories                       active categories + item counts (public)
/// /reviews                          approved reviews + average (GET), submit (POST)
/// /events                           active events (public)
/// /gallery                          active gallery images (public)
/// /search                           menu search (public)
/// /stats                            aggregate site stats (public)
/// /contact                          contact form (POST)
///
/// /reservations                     submit reservation (POST)
/// /reservations/availability        slot availability check (GET)
///
/// /admin/dashboard                  headline counts + recent activity
/// /admin/reservations               list; {id} get; {id}/status put; {id} delete
/// /admin/menu                       list, create; {id} update/delete; {id}/image upload
/// /admin/categories                 list, create; {id} update/delete
/// /admin/gallery                    list, create (multipart); {id} update/delete
/// /admin/reviews                    list; {id}/approve; {id}/feature; {id} delete
/// /admin/events                     list, create; {id} update/delete; {id}/image upload
/// /admin/messages                   list; {id}/read; {id} delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login).
        .nest("/auth", auth::router())
        // Public site endpoints.
        .merge(public::router())
        // Staff back-office.
        .nest("/admin", admin::router())
}
