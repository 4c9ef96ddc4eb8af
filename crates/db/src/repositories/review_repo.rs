//! Repository for the `reviews` table.

use sqlx::PgPool;
use tavola_core::types::DbId;

use crate::models::review::{CreateReview, Review};

/// Column list for reviews queries.
const COLUMNS: &str =
    "id, customer_name, rating, comment, is_approved, is_featured, created_at";

/// Provides CRUD and aggregate operations for guest reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Store a new review awaiting moderation.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (customer_name, rating, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.customer_name)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a review by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approved reviews, newest first.
    pub async fn list_approved(pool: &PgPool, limit: i64) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE is_approved
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Reviews filtered by approval state (`None` lists everything),
    /// newest first, for the admin moderation queue.
    pub async fn list_by_approval(
        pool: &PgPool,
        approved: Option<bool>,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE ($1::boolean IS NULL OR is_approved = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(approved)
            .fetch_all(pool)
            .await
    }

    /// Approve a review for publication.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_approved = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Toggle whether a review is featured on the homepage.
    pub async fn toggle_featured(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_featured = NOT is_featured
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of approved reviews.
    pub async fn count_approved(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE is_approved")
            .fetch_one(pool)
            .await
    }

    /// Number of reviews awaiting moderation.
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE NOT is_approved")
            .fetch_one(pool)
            .await
    }

    /// Average rating across approved reviews; `None` when there are none.
    pub async fn average_rating(pool: &PgPool) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar("SELECT AVG(rating)::float8 FROM reviews WHERE is_approved")
            .fetch_one(pool)
            .await
    }
}
