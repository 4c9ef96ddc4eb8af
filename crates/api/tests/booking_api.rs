//! HTTP-level integration tests for the reservation booking flow:
//! availability checks, capacity enforcement, temporal validation, and
//! the status-transition notification rules.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, expect_status, get, get_auth, post_json,
    put_json_auth, reservation_payload, tomorrow,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_slot_reports_full_capacity_free(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let date = tomorrow();

    let response = get(
        &app,
        &format!("/api/v1/reservations/availability?date={date}&time=19:00&party_size=4"),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["available"], true);
    assert_eq!(json["occupancy_count"], 0);
    assert_eq!(json["capacity"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn availability_counts_only_matching_slot(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let date = tomorrow();

    // One reservation at 19:00, one at 20:00.
    for time in ["19:00", "20:00"] {
        let response = post_json(
            &app,
            "/api/v1/reservations",
            reservation_payload(&date, time, "guest@example.com"),
        )
        .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    let response = get(
        &app,
        &format!("/api/v1/reservations/availability?date={date}&time=19:00&party_size=2"),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["occupancy_count"], 1);
    assert_eq!(json["available"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn availability_rejects_past_date(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    let response = get(
        &app,
        "/api/v1/reservations/availability?date=2020-01-01&time=19:00&party_size=2",
    )
    .await;

    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn availability_rejects_malformed_input(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    let response = get(
        &app,
        "/api/v1/reservations/availability?date=01/06/2030&time=19:00",
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;

    let date = tomorrow();
    let response = get(
        &app,
        &format!("/api/v1/reservations/availability?date={date}&time=7pm"),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

// ---------------------------------------------------------------------------
// Submission & capacity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_creates_pending_reservation_and_sends_ack(pool: PgPool) {
    let (app, notifier) = common::build_test_app(pool);
    let date = tomorrow();

    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "ada@example.com"),
    )
    .await;

    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["party_size"], 4);
    assert!(json["data"]["id"].is_number());
    assert_eq!(notifier.reservation_send_count(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sixth_submission_for_a_slot_is_refused(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let date = tomorrow();

    // Fill the slot: 4 bookings, then check the boundary, then the 5th.
    for i in 0..4 {
        let response = post_json(
            &app,
            "/api/v1/reservations",
            reservation_payload(&date, "19:00", &format!("guest{i}@example.com")),
        )
        .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    let response = get(
        &app,
        &format!("/api/v1/reservations/availability?date={date}&time=19:00&party_size=2"),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["available"], true);
    assert_eq!(json["occupancy_count"], 4);

    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "fifth@example.com"),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await;

    // Slot is now full: the 6th submission is refused...
    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "sixth@example.com"),
    )
    .await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("fully booked"));

    // ...and the availability check agrees.
    let response = get(
        &app,
        &format!("/api/v1/reservations/availability?date={date}&time=19:00&party_size=2"),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["available"], false);
    assert_eq!(json["occupancy_count"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cancelling_frees_slot_capacity(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();
    let date = tomorrow();

    let mut first_id = 0;
    for i in 0..5 {
        let response = post_json(
            &app,
            "/api/v1/reservations",
            reservation_payload(&date, "19:00", &format!("guest{i}@example.com")),
        )
        .await;
        let json = expect_status(response, StatusCode::CREATED).await;
        if i == 0 {
            first_id = json["data"]["id"].as_i64().unwrap();
        }
    }

    // Cancel one of the five.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/reservations/{first_id}/status"),
        &token,
        serde_json::json!({"status": "cancelled"}),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    // The cancelled reservation no longer counts toward occupancy.
    let response = get(
        &app,
        &format!("/api/v1/reservations/availability?date={date}&time=19:00&party_size=2"),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["available"], true);
    assert_eq!(json["occupancy_count"], 4);

    // And the slot accepts a new booking again.
    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "replacement@example.com"),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn past_date_submission_fails_and_persists_nothing(pool: PgPool) {
    let (app, notifier) = common::build_test_app(pool);
    let token = admin_token();

    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload("2020-01-01", "19:00", "late@example.com"),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(notifier.reservation_send_count(), 0);

    // Nothing was stored.
    let response = get_auth(&app, "/api/v1/admin/reservations", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn party_size_out_of_bounds_is_rejected(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let date = tomorrow();

    for party_size in [0, 21] {
        let mut payload = reservation_payload(&date, "19:00", "guest@example.com");
        payload["party_size"] = serde_json::json!(party_size);
        let response = post_json(&app, "/api/v1/reservations", payload).await;
        let json = expect_status(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_special_requests_rejected(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let date = tomorrow();

    let mut payload = reservation_payload(&date, "19:00", "guest@example.com");
    payload["special_requests"] = serde_json::json!("x".repeat(501));
    let response = post_json(&app, "/api/v1/reservations", payload).await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

// ---------------------------------------------------------------------------
// Status transitions & notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn confirming_sends_exactly_one_notification(pool: PgPool) {
    let (app, notifier) = common::build_test_app(pool);
    let token = admin_token();
    let date = tomorrow();

    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "ada@example.com"),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let created_at = json["data"]["created_at"].as_str().unwrap().to_string();

    // Submission itself sent the acknowledgment.
    assert_eq!(notifier.reservation_send_count(), 1);

    // pending -> confirmed: exactly one more send, updated_at refreshed.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/reservations/{id}/status"),
        &token,
        serde_json::json!({"status": "confirmed"}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "confirmed");
    assert_eq!(notifier.reservation_send_count(), 2);

    let updated_at = json["data"]["updated_at"].as_str().unwrap();
    let created = chrono::DateTime::parse_from_rfc3339(&created_at).unwrap();
    let updated = chrono::DateTime::parse_from_rfc3339(updated_at).unwrap();
    assert!(updated > created, "updated_at must be refreshed");

    // confirmed -> confirmed: no additional send.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/reservations/{id}/status"),
        &token,
        serde_json::json!({"status": "confirmed"}),
    )
    .await;
    expect_status(response, StatusCode::OK).await;
    assert_eq!(notifier.reservation_send_count(), 2);

    // confirmed -> cancelled: no send.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/reservations/{id}/status"),
        &token,
        serde_json::json!({"status": "cancelled"}),
    )
    .await;
    expect_status(response, StatusCode::OK).await;
    assert_eq!(notifier.reservation_send_count(), 2);

    // cancelled -> confirmed is currently permitted and notifies again.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/reservations/{id}/status"),
        &token,
        serde_json::json!({"status": "confirmed"}),
    )
    .await;
    expect_status(response, StatusCode::OK).await;
    assert_eq!(notifier.reservation_send_count(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_update_validates_input(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();

    // Unknown id.
    let response = put_json_auth(
        &app,
        "/api/v1/admin/reservations/999999/status",
        &token,
        serde_json::json!({"status": "confirmed"}),
    )
    .await;
    let json = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");

    // Unknown status value.
    let date = tomorrow();
    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "ada@example.com"),
    )
    .await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/reservations/{id}/status"),
        &token,
        serde_json::json!({"status": "waitlisted"}),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_hard_delete_a_reservation(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let token = admin_token();
    let date = tomorrow();

    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "ada@example.com"),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = delete_auth(&app, &format!("/api/v1/admin/reservations/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app, &format!("/api/v1/admin/reservations/{id}"), &token).await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reservation_delete_requires_admin_role(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let date = tomorrow();

    let response = post_json(
        &app,
        "/api/v1/reservations",
        reservation_payload(&date, "19:00", "ada@example.com"),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = delete_auth(
        &app,
        &format!("/api/v1/admin/reservations/{id}"),
        &common::staff_token(),
    )
    .await;
    let json = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}
