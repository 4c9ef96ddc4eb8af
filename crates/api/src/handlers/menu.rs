//! Handlers for the menu: public listing/search and admin CRUD.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use tavola_core::catalog::{
    validate_allergens, validate_description, validate_item_name, validate_price,
};
use tavola_core::error::CoreError;
use tavola_core::search::validate_search_query;
use tavola_core::types::DbId;
use tavola_db::models::menu_item::{CreateMenuItem, MenuListParams, UpdateMenuItem};
use tavola_db::repositories::{CategoryRepo, MenuItemRepo};

use crate::error::{AppError, AppResult};
use crate::media;
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// GET /menu?category_id=&featured=
///
/// Available menu items, ordered by category then display order.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<MenuListParams>,
) -> AppResult<impl IntoResponse> {
    let items = MenuItemRepo::list_available(
        &state.pool,
        params.category_id,
        params.featured.unwrap_or(false),
    )
    .await?;

    Ok(Json(DataResponse { data: items }))
}

/// GET /menu/{id}
///
/// A single menu item; unavailable items are hidden from the public.
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|item| item.is_available)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id,
        }))?;

    Ok(Json(DataResponse { data: item }))
}

/// Query parameters for the public menu search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// GET /search?q=
///
/// Case-insensitive search over available item names and descriptions.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    validate_search_query(&params.q)?;
    let items = MenuItemRepo::search(&state.pool, params.q.trim()).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// Query parameters for the admin menu listing.
#[derive(Debug, Deserialize)]
pub struct AdminMenuParams {
    pub category_id: Option<DbId>,
}

/// GET /admin/menu?category_id=
pub async fn list_admin(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AdminMenuParams>,
) -> AppResult<impl IntoResponse> {
    let items = MenuItemRepo::list_all(&state.pool, params.category_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /admin/menu
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<impl IntoResponse> {
    validate_item_name(&input.name)?;
    validate_description(&input.description)?;
    validate_price(input.price)?;
    validate_allergens(&input.allergens)?;

    if CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Category {} does not exist",
            input.category_id
        ))));
    }

    let item = MenuItemRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        item_id = item.id,
        name = %item.name,
        "Menu item created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /admin/menu/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_item_name(name)?;
    }
    validate_description(&input.description)?;
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    validate_allergens(&input.allergens)?;

    if let Some(category_id) = input.category_id {
        if CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Category {category_id} does not exist"
            ))));
        }
    }

    let item = MenuItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, item_id = id, "Menu item updated");

    Ok(Json(DataResponse { data: item }))
}

/// POST /admin/menu/{id}/image  (multipart, field `image`)
///
/// Attach a photo to a menu item, replacing and removing any previous one.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id,
        }))?;

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
                    "menu",
                    &filename,
                    bytes.to_vec(),
                    media::MENU_IMAGE_SIZE,
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

    let item = MenuItemRepo::set_image(&state.pool, id, &image_url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, item_id = id, image = %image_url, "Menu item image set");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /admin/menu/{id}
///
/// Admin role required. Removes the item's stored image as well.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    let item = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MenuItem",
            id,
        }))?;

    MenuItemRepo::delete(&state.pool, id).await?;

    if let Some(ref image) = item.image_url {
        media::delete_image(&state.config.uploads_dir, image).await;
    }

    tracing::info!(user_id = auth.user_id, item_id = id, "Menu item deleted");

    Ok(StatusCode::NO_CONTENT)
}
