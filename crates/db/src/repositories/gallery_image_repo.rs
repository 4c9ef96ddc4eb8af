//! Repository for the `gallery_images` table.

use sqlx::PgPool;
use tavola_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use tavola_core::types::DbId;

use crate::models::gallery_image::{CreateGalleryImage, GalleryImage, UpdateGalleryImage};

/// Column list for gallery_images queries.
const COLUMNS: &str = "id, title, image_url, thumbnail_url, description, alt_text, \
    display_order, is_active, created_at";

/// Provides CRUD operations for gallery images.
pub struct GalleryImageRepo;

impl GalleryImageRepo {
    /// Create a new gallery image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryImage,
    ) -> Result<GalleryImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_images
                (title, image_url, description, alt_text, display_order, is_active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.description)
            .bind(&input.alt_text)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a gallery image by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_images WHERE id = $1");
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active images for the public gallery, paginated.
    pub async fn list_active(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_images
             WHERE is_active
             ORDER BY display_order, created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every image, for the admin listing.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_images
             ORDER BY display_order, created_at DESC"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update image metadata by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryImage,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_images SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                alt_text = COALESCE($4, alt_text),
                display_order = COALESCE($5, display_order),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.alt_text)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a gallery image by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
