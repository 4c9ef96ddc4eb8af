//! Handlers for the image gallery: public listing and admin management.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use tavola_core::error::CoreError;
use tavola_core::types::DbId;
use tavola_db::models::gallery_image::{CreateGalleryImage, UpdateGalleryImage};
use tavola_db::repositories::GalleryImageRepo;

use crate::error::{AppError, AppResult};
use crate::media;
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public gallery listing.
#[derive(Debug, Deserialize)]
pub struct GalleryParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /gallery?limit=&offset=
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> AppResult<impl IntoResponse> {
    let images = GalleryImageRepo::list_active(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: images }))
}

/// GET /admin/gallery
pub async fn list_admin(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let images = GalleryImageRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /admin/gallery  (multipart)
///
/// Fields: `image` (required), `title`, `description`, `alt_text`,
/// `display_order`, `is_active`. The alt text defaults to the title.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut image_url: Option<String> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut alt_text: Option<String> = None;
    let mut display_order: i32 = 0;
    let mut is_active = true;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("image") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                image_url = Some(
                    media::save_image(
                        &state.config.uploads_dir,
                        "gallery",
                        &filename,
                        bytes.to_vec(),
                        media::GALLERY_IMAGE_SIZE,
                    )
                    .await?,
                );
            }
            Some("title") => title = read_text(field).await?,
            Some("description") => description = read_text(field).await?,
            Some("alt_text") => alt_text = read_text(field).await?,
            Some("display_order") => {
                if let Some(text) = read_text(field).await? {
                    display_order = text.parse().map_err(|_| {
                        AppError::BadRequest("display_order must be an integer".to_string())
                    })?;
                }
            }
            Some("is_active") => {
                if let Some(text) = read_text(field).await? {
                    is_active = text.parse().map_err(|_| {
                        AppError::BadRequest("is_active must be true or false".to_string())
                    })?;
                }
            }
            _ => {}
        }
    }

    let image_url =
        image_url.ok_or_else(|| AppError::BadRequest("Missing 'image' field".to_string()))?;

    let create = CreateGalleryImage {
        alt_text: alt_text.or_else(|| title.clone()),
        title,
        image_url,
        description,
        display_order,
        is_active,
    };

    let image = GalleryImageRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = auth.user_id, image_id = image.id, "Gallery image added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// PUT /admin/gallery/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryImage>,
) -> AppResult<impl IntoResponse> {
    let image = GalleryImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GalleryImage",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, image_id = id, "Gallery image updated");

    Ok(Json(DataResponse { data: image }))
}

/// DELETE /admin/gallery/{id}
///
/// Removes the stored image file along with the record.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    let image = GalleryImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GalleryImage",
            id,
        }))?;

    GalleryImageRepo::delete(&state.pool, id).await?;
    media::delete_image(&state.config.uploads_dir, &image.image_url).await;

    tracing::info!(user_id = auth.user_id, image_id = id, "Gallery image deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Read a multipart text field, mapping empty strings to `None`.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<Option<String>> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {e}")))?;
    Ok(if text.is_empty() { None } else { Some(text) })
}
