//! HTTP-level integration tests for the public site endpoints: menu,
//! categories, reviews, events, search, stats, and the contact form.

mod common;

use axum::http::StatusCode;
use common::{admin_token, expect_status, get, post_auth, post_json, post_json_auth};
use sqlx::PgPool;

/// Create a category via the admin API and return its id.
async fn create_category(app: &axum::Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        token,
        serde_json::json!({"name": name}),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Create a menu item via the admin API and return its id.
async fn create_item(
    app: &axum::Router,
    token: &str,
    category_id: i64,
    name: &str,
    featured: bool,
) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/admin/menu",
        token,
        serde_json::json!({
            "name": name,
            "description": "Slow-braised with rosemary",
            "price": 18.5,
            "category_id": category_id,
            "is_featured": featured,
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let response = get(&app, "/health").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn menu_lists_available_items_with_filters(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let mains = create_category(&app, &token, "Mains").await;
    let desserts = create_category(&app, &token, "Desserts").await;
    create_item(&app, &token, mains, "Osso Buco", true).await;
    create_item(&app, &token, desserts, "Tiramisu", false).await;

    let response = get(&app, "/api/v1/menu").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(&app, &format!("/api/v1/menu?category_id={mains}")).await;
    let json = expect_status(response, StatusCode::OK).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Osso Buco");

    let response = get(&app, "/api/v1/menu?featured=true").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unavailable_item_is_hidden_from_public(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let mains = create_category(&app, &token, "Mains").await;
    let item = create_item(&app, &token, mains, "Osso Buco", false).await;

    let response = common::put_json_auth(
        &app,
        &format!("/api/v1/admin/menu/{item}"),
        &token,
        serde_json::json!({"is_available": false}),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = get(&app, &format!("/api/v1/menu/{item}")).await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    let response = get(&app, "/api/v1/menu").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn categories_report_available_item_counts(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let mains = create_category(&app, &token, "Mains").await;
    create_item(&app, &token, mains, "Osso Buco", false).await;
    create_item(&app, &token, mains, "Risotto", false).await;

    let response = get(&app, "/api/v1/categories").await;
    let json = expect_status(response, StatusCode::OK).await;
    let categories = json["data"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Mains");
    assert_eq!(categories[0]["slug"], "mains");
    assert_eq!(categories[0]["item_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_requires_two_characters(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    let response = get(&app, "/api/v1/search?q=a").await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_name_and_description(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let mains = create_category(&app, &token, "Mains").await;
    create_item(&app, &token, mains, "Osso Buco", false).await;

    // Matches the name, case-insensitively.
    let response = get(&app, "/api/v1/search?q=osso").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Matches the description.
    let response = get(&app, "/api/v1/search?q=rosemary").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get(&app, "/api/v1/search?q=sushi").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_moderation_flow(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let response = post_json(
        &app,
        "/api/v1/reviews",
        serde_json::json!({
            "customer_name": "Grace Hopper",
            "rating": 5,
            "comment": "Best osso buco this side of Milan.",
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["is_approved"], false);

    // Hidden from the public until approved.
    let response = get(&app, "/api/v1/reviews").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["count"], 0);

    let response = post_auth(&app, &format!("/api/v1/admin/reviews/{id}/approve"), &token).await;
    expect_status(response, StatusCode::OK).await;

    let response = get(&app, "/api/v1/reviews").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["average_rating"], 5.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_submission_is_validated(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    // Rating out of range.
    let response = post_json(
        &app,
        "/api/v1/reviews",
        serde_json::json!({
            "customer_name": "Grace Hopper",
            "rating": 6,
            "comment": "A comment long enough to pass.",
        }),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;

    // Comment too short.
    let response = post_json(
        &app,
        "/api/v1/reviews",
        serde_json::json!({
            "customer_name": "Grace Hopper",
            "rating": 4,
            "comment": "meh",
        }),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn events_listing_defaults_to_upcoming(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let future = chrono::Utc::now() + chrono::Duration::days(14);
    let response = post_json_auth(
        &app,
        "/api/v1/admin/events",
        &token,
        serde_json::json!({
            "title": "Jazz Night",
            "description": "Live trio, late seating.",
            "event_date": future.to_rfc3339(),
        }),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await;

    let response = get(&app, "/api/v1/events").await;
    let json = expect_status(response, StatusCode::OK).await;
    let events = json["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Jazz Night");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn event_creation_rejects_past_dates(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let past = chrono::Utc::now() - chrono::Duration::days(1);
    let response = post_json_auth(
        &app,
        "/api/v1/admin/events",
        &token,
        serde_json::json!({
            "title": "Jazz Night",
            "description": "Live trio, late seating.",
            "event_date": past.to_rfc3339(),
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contact_form_stores_message_and_notifies_staff(pool: PgPool) {
    let (app, notifier) = common::build_test_app(pool);
    let token = admin_token();

    let response = post_json(
        &app,
        "/api/v1/contact",
        serde_json::json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "message": "Do you take large groups on Sundays?",
        }),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await;
    assert_eq!(notifier.contact_send_count(), 1);

    let response = common::get_auth(&app, "/api/v1/admin/messages", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["is_read"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contact_form_is_validated(pool: PgPool) {
    let (app, notifier) = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/contact",
        serde_json::json!({
            "name": "Grace Hopper",
            "email": "not-an-email",
            "message": "Do you take large groups on Sundays?",
        }),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(notifier.contact_send_count(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stats_aggregate_public_numbers(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    let mains = create_category(&app, &token, "Mains").await;
    create_item(&app, &token, mains, "Osso Buco", false).await;

    let response = post_json(
        &app,
        "/api/v1/reviews",
        serde_json::json!({
            "customer_name": "Grace Hopper",
            "rating": 4,
            "comment": "Lovely evening, great service.",
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let review_id = json["data"]["id"].as_i64().unwrap();
    let response = post_auth(
        &app,
        &format!("/api/v1/admin/reviews/{review_id}/approve"),
        &token,
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let response = get(&app, "/api/v1/stats").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["total_reviews"], 1);
    assert_eq!(json["data"]["average_rating"], 4.0);
    assert_eq!(json["data"]["total_menu_items"], 1);
    assert_eq!(json["data"]["upcoming_events"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn gallery_listing_is_empty_initially(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let response = get(&app, "/api/v1/gallery").await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
