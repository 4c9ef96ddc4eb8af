//! Handlers for menu categories: public listing and admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use tavola_core::catalog::{slugify, validate_category_name, validate_description};
use tavola_core::error::CoreError;
use tavola_core::types::DbId;
use tavola_db::models::category::{CreateCategory, UpdateCategory};
use tavola_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /categories
///
/// Active categories with their available-item counts.
pub async fn list_public(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_active_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /admin/categories
pub async fn list_admin(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /admin/categories
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_category_name(&input.name)?;
    validate_description(&input.description)?;

    let slug = slugify(&input.name);
    let category = CategoryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        user_id = auth.user_id,
        category_id = category.id,
        name = %category.name,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /admin/categories/{id}
///
/// Renaming a category re-derives its slug.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_category_name(name)?;
    }
    validate_description(&input.description)?;

    let slug = input.name.as_deref().map(slugify);
    let category = CategoryRepo::update(&state.pool, id, &input, slug.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, category_id = id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /admin/categories/{id}
///
/// Admin role required. Refused while menu items still reference the
/// category -- items must be reassigned or deleted first.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    if CategoryRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    let item_count = CategoryRepo::menu_item_count(&state.pool, id).await?;
    if item_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete a category with {item_count} menu items. \
             Reassign or delete the items first."
        ))));
    }

    CategoryRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
