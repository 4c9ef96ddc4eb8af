//! Handlers for contact messages: the public contact form and the admin
//! inbox.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use tavola_core::contact::{
    validate_contact_phone, validate_message, validate_sender_email, validate_sender_name,
    validate_subject,
};
use tavola_core::error::CoreError;
use tavola_core::types::DbId;
use tavola_db::models::contact_message::CreateContactMessage;
use tavola_db::repositories::ContactMessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /contact
///
/// Store a contact message and notify the restaurant mailbox. The
/// notification is best-effort; the submission succeeds regardless.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<impl IntoResponse> {
    validate_sender_name(&input.name)?;
    validate_sender_email(&input.email)?;
    validate_contact_phone(&input.phone)?;
    validate_subject(&input.subject)?;
    validate_message(&input.message)?;

    let message = ContactMessageRepo::create(&state.pool, &input).await?;

    tracing::info!(message_id = message.id, "Contact message received");

    state.notifier.send_contact_notification(&message).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /admin/messages
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let messages = ContactMessageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /admin/messages/{id}/read
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, message_id = id, "Contact message marked read");

    Ok(Json(DataResponse { data: message }))
}

/// DELETE /admin/messages/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ContactMessageRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, message_id = id, "Contact message deleted");

    Ok(StatusCode::NO_CONTENT)
}
