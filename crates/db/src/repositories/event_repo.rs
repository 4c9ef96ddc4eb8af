//! Repository for the `events` table.

use sqlx::PgPool;
use tavola_core::types::{DbId, Timestamp};

use crate::models::event::{CreateEvent, Event, UpdateEvent};

/// Column list for events queries.
const COLUMNS: &str = "id, title, description, event_date, end_date, image_url, \
    is_active, is_featured, created_at, updated_at";

/// Provides CRUD operations for restaurant events.
pub struct EventRepo;

impl EventRepo {
    /// Create a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (title, description, event_date, end_date, is_active, is_featured)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(input.end_date)
            .bind(input.is_active.unwrap_or(true))
            .bind(input.is_featured.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active events for the public listing, soonest first. With
    /// `upcoming_only`, events earlier than `now` are excluded.
    pub async fn list_active(
        pool: &PgPool,
        upcoming_only: bool,
        now: Timestamp,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE is_active AND (NOT $1 OR event_date >= $2)
             ORDER BY event_date"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(upcoming_only)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Every event, newest first, for the admin listing.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY event_date DESC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Update an event by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                end_date = COALESCE($5, end_date),
                is_active = COALESCE($6, is_active),
                is_featured = COALESCE($7, is_featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(input.end_date)
            .bind(input.is_active)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Attach (or replace) an event's image URL.
    pub async fn set_image(
        pool: &PgPool,
        id: DbId,
        image_url: &str,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET image_url = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of active events at or after `now`.
    pub async fn count_upcoming(pool: &PgPool, now: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE is_active AND event_date >= $1")
            .bind(now)
            .fetch_one(pool)
            .await
    }
}
