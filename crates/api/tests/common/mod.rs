//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt::oneshot` to send requests directly to
//! the router without an actual TCP listener, and a recording notifier
//! so tests can assert exactly how many emails a flow produced.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use tavola_api::auth::jwt::{generate_access_token, JwtConfig};
use tavola_api::config::ServerConfig;
use tavola_api::router::build_app_router;
use tavola_api::state::AppState;
use tavola_db::models::contact_message::ContactMessage;
use tavola_db::models::reservation::Reservation;
use tavola_notify::Notifier;

// ---------------------------------------------------------------------------
// Recording notifier
// ---------------------------------------------------------------------------

/// Notifier that counts sends instead of talking to an SMTP server.
#[derive(Default)]
pub struct RecordingNotifier {
    pub reservation_sends: AtomicUsize,
    pub contact_sends: AtomicUsize,
}

impl RecordingNotifier {
    pub fn reservation_send_count(&self) -> usize {
        self.reservation_sends.load(Ordering::SeqCst)
    }

    pub fn contact_send_count(&self) -> usize {
        self.contact_sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_reservation_confirmation(&self, _reservation: &Reservation) -> bool {
        self.reservation_sends.fetch_add(1, Ordering::SeqCst);
        true
    }

    async fn send_contact_notification(&self, _message: &ContactMessage) -> bool {
        self.contact_sends.fetch_add(1, Ordering::SeqCst);
        true
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        uploads_dir: std::env::temp_dir().join("tavola-test-uploads"),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the application router plus the recording notifier behind it.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<RecordingNotifier>) {
    let config = test_config();
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::new(pool, Arc::new(config.clone()), notifier.clone());
    (build_app_router(state, &config), notifier)
}

/// Mint an access token with the `admin` role for the test JWT config.
pub fn admin_token() -> String {
    generate_access_token(1, "admin", &test_config().jwt).expect("token generation")
}

/// Mint an access token with the `staff` role for the test JWT config.
pub fn staff_token() -> String {
    generate_access_token(2, "staff", &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// Assert a status code and return the parsed body for further checks.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    let actual = response.status();
    let body = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {body}");
    body
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A date guaranteed to be bookable (tomorrow, local time).
pub fn tomorrow() -> String {
    (chrono::Local::now().date_naive() + chrono::Days::new(1))
        .format("%Y-%m-%d")
        .to_string()
}

/// A well-formed reservation submission for the given slot.
pub fn reservation_payload(date: &str, time: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Ada Lovelace",
        "email": email,
        "phone": "+1 555 000 1111",
        "date": date,
        "time": time,
        "party_size": 4,
    })
}
