//! Handlers for guest reviews: public listing/submission and admin
//! moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use tavola_core::error::CoreError;
use tavola_core::review::{
    round_rating, validate_comment, validate_rating, DEFAULT_REVIEW_LIMIT, MAX_REVIEW_LIMIT,
};
use tavola_core::search::clamp_limit;
use tavola_core::types::DbId;
use tavola_db::models::review::{CreateReview, Review, ReviewListParams};
use tavola_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// Query parameters for the public reviews listing.
#[derive(Debug, Deserialize)]
pub struct PublicReviewParams {
    pub limit: Option<i64>,
}

/// Public reviews payload: the approved reviews plus their aggregate.
#[derive(Debug, Serialize)]
pub struct ReviewsWithAverage {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub count: usize,
}

/// GET /reviews?limit=
///
/// Approved reviews, newest first, with the overall average rating.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PublicReviewParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_REVIEW_LIMIT, MAX_REVIEW_LIMIT);
    let reviews = ReviewRepo::list_approved(&state.pool, limit).await?;
    let average_rating = ReviewRepo::average_rating(&state.pool).await?.unwrap_or(0.0);

    Ok(Json(DataResponse {
        data: ReviewsWithAverage {
            count: reviews.len(),
            average_rating: round_rating(average_rating),
            reviews,
        },
    }))
}

/// POST /reviews
///
/// Submit a review for moderation. It stays hidden from the public
/// listing until a staff member approves it.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<impl IntoResponse> {
    tavola_core::booking::validate_guest_name(&input.customer_name)?;
    validate_rating(input.rating)?;
    validate_comment(&input.comment)?;

    let review = ReviewRepo::create(&state.pool, &input).await?;

    tracing::info!(review_id = review.id, rating = review.rating, "Review submitted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /admin/reviews?status=
///
/// Reviews by moderation state: `pending` (default), `approved`, or `all`.
pub async fn list_admin(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<impl IntoResponse> {
    let approved = match params.status.as_deref().unwrap_or("pending") {
        "pending" => Some(false),
        "approved" => Some(true),
        "all" => None,
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown status filter '{other}'. Expected pending, approved, or all"
            )))
        }
    };

    let reviews = ReviewRepo::list_by_approval(&state.pool, approved).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// POST /admin/reviews/{id}/approve
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewRepo::approve(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, review_id = id, "Review approved");

    Ok(Json(DataResponse { data: review }))
}

/// POST /admin/reviews/{id}/feature
pub async fn toggle_featured(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    tracing::info!(
        user_id = auth.user_id,
        review_id = id,
        featured = review.is_featured,
        "Review feature flag toggled"
    );

    Ok(Json(DataResponse { data: review }))
}

/// DELETE /admin/reviews/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ReviewRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, review_id = id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}
