//! Handlers for restaurant events: public listing and admin CRUD.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use tavola_core::error::CoreError;
use tavola_core::event::{validate_event_description, validate_event_schedule, validate_title};
use tavola_core::types::DbId;
use tavola_db::models::event::{CreateEvent, EventListParams, UpdateEvent};
use tavola_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::media;
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /events?upcoming=
///
/// Active events, soonest first. Defaults to upcoming events only.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let events =
        EventRepo::list_active(&state.pool, params.upcoming.unwrap_or(true), Utc::now()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /admin/events
pub async fn list_admin(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /admin/events
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_event_description(&input.description)?;
    validate_event_schedule(input.event_date, input.end_date, Utc::now())?;

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        event_id = event.id,
        title = %event.title,
        "Event created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /admin/events/{id}
///
/// Scheduling is only re-validated when the event date itself changes,
/// so an already-past event can still have its description edited.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref description) = input.description {
        validate_event_description(description)?;
    }
    if let Some(event_date) = input.event_date {
        validate_event_schedule(event_date, input.end_date, Utc::now())?;
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(user_id = auth.user_id, event_id = id, "Event updated");

    Ok(Json(DataResponse { data: event }))
}

/// POST /admin/events/{id}/image  (multipart, field `image`)
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    let mut stored: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            stored = Some(
                media::save_image(
                    &state.config.uploads_dir,
                    "events",
                    &filename,
                    bytes.to_vec(),
                    media::EVENT_IMAGE_SIZE,
                )
                .await?,
            );
        }
    }

    let image_url =
        stored.ok_or_else(|| AppError::BadRequest("Missing 'image' field".to_string()))?;

    if let Some(ref old) = existing.image_url {
        media::delete_image(&state.config.uploads_dir, old).await;
    }

    let event = EventRepo::set_image(&state.pool, id, &image_url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(user_id = auth.user_id, event_id = id, image = %image_url, "Event image set");

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /admin/events/{id}
///
/// Admin role required. Removes the stored image as well.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    EventRepo::delete(&state.pool, id).await?;

    if let Some(ref image) = event.image_url {
        media::delete_image(&state.config.uploads_dir, image).await;
    }

    tracing::info!(user_id = auth.user_id, event_id = id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}
