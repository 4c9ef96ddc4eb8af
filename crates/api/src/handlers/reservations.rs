//! Handlers for reservations: the public availability check and
//! submission, plus the admin lifecycle endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use tavola_core::booking::parse_slot_date;
use tavola_core::error::CoreError;
use tavola_core::types::DbId;
use tavola_db::models::reservation::ReservationListParams;
use tavola_db::repositories::ReservationRepo;

use crate::engine::SubmitReservation;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// Query parameters for the availability check.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub date: String,
    pub time: String,
    pub party_size: Option<i32>,
}

/// Availability check response: occupancy alongside the verdict so the
/// client can render "4 of 5 booked" style messaging.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub occupancy_count: i64,
    pub capacity: i64,
    pub message: String,
}

/// GET /reservations/availability?date=&time=&party_size=
///
/// Advisory slot availability check. The result is not a hold: the slot
/// may fill between this check and a subsequent submission.
pub async fn check_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<AvailabilityResponse>> {
    let availability = state
        .engine
        .check_availability(&params.date, &params.time)
        .await?;

    tracing::debug!(
        date = %params.date,
        time = %params.time,
        party_size = params.party_size,
        available = availability.available,
        "Availability checked"
    );

    Ok(Json(AvailabilityResponse {
        available: availability.available,
        occupancy_count: availability.occupancy_count,
        capacity: availability.capacity,
        message: availability.message().to_string(),
    }))
}

/// POST /reservations
///
/// Submit a new reservation. Created in `pending` state; the guest
/// receives an acknowledgment email on success.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitReservation>,
) -> AppResult<impl IntoResponse> {
    let reservation = state.engine.submit(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// Request body for the status update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /admin/reservations?status=&date=&limit=&offset=
///
/// List reservations, optionally filtered by status and/or date. An
/// unparseable date filter is ignored rather than rejected.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReservationListParams>,
) -> AppResult<impl IntoResponse> {
    let date = params
        .date
        .as_deref()
        .and_then(|d| parse_slot_date(d).ok());

    let reservations = ReservationRepo::list(
        &state.pool,
        params.status.as_deref(),
        date,
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: reservations }))
}

/// GET /admin/reservations/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))?;

    Ok(Json(DataResponse { data: reservation }))
}

/// PUT /admin/reservations/{id}/status
///
/// Set a reservation's status. Entering `confirmed` notifies the guest.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let reservation = state.engine.set_status(id, &input.status).await?;

    tracing::info!(
        user_id = auth.user_id,
        reservation_id = id,
        status = %input.status,
        "Reservation status set by staff"
    );

    Ok(Json(DataResponse { data: reservation }))
}

/// DELETE /admin/reservations/{id}
///
/// Hard-delete a reservation. Admin role required.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;
    state.engine.delete(id).await?;

    tracing::info!(user_id = auth.user_id, reservation_id = id, "Reservation deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}
