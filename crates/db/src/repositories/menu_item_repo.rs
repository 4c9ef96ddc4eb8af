//! Repository for the `menu_items` table.

use sqlx::PgPool;
use tavola_core::search::SEARCH_RESULT_LIMIT;
use tavola_core::types::DbId;

use crate::models::menu_item::{CreateMenuItem, MenuItem, UpdateMenuItem};

/// Column list for menu_items queries.
const COLUMNS: &str = "id, name, description, price, category_id, image_url, \
    is_available, is_featured, allergens, preparation_time, display_order, \
    created_at, updated_at";

/// Provides CRUD and search operations for menu items.
pub struct MenuItemRepo;

impl MenuItemRepo {
    /// Create a new menu item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMenuItem) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items
                (name, description, price, category_id, is_available, is_featured,
                 allergens, preparation_time, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .bind(input.is_available.unwrap_or(true))
            .bind(input.is_featured.unwrap_or(false))
            .bind(&input.allergens)
            .bind(input.preparation_time)
            .bind(input.display_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a menu item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Available items for the public menu, ordered by category then
    /// display order, optionally filtered by category and/or featured.
    pub async fn list_available(
        pool: &PgPool,
        category_id: Option<DbId>,
        featured_only: bool,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items
             WHERE is_available
               AND ($1::bigint IS NULL OR category_id = $1)
               AND (NOT $2 OR is_featured)
             ORDER BY category_id, display_order"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(category_id)
            .bind(featured_only)
            .fetch_all(pool)
            .await
    }

    /// Every item regardless of availability, for the admin listing.
    pub async fn list_all(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items
             WHERE ($1::bigint IS NULL OR category_id = $1)
             ORDER BY category_id, display_order"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over available item names and
    /// descriptions, capped at [`SEARCH_RESULT_LIMIT`] results.
    pub async fn search(pool: &PgPool, query_str: &str) -> Result<Vec<MenuItem>, sqlx::Error> {
        let pattern = format!("%{query_str}%");
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items
             WHERE is_available AND (name ILIKE $1 OR description ILIKE $1)
             ORDER BY name
             LIMIT $2"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(&pattern)
            .bind(SEARCH_RESULT_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update a menu item by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category_id = COALESCE($5, category_id),
                is_available = COALESCE($6, is_available),
                is_featured = COALESCE($7, is_featured),
                allergens = COALESCE($8, allergens),
                preparation_time = COALESCE($9, preparation_time),
                display_order = COALESCE($10, display_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .bind(input.is_available)
            .bind(input.is_featured)
            .bind(&input.allergens)
            .bind(input.preparation_time)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Attach (or replace) an item's image URL.
    pub async fn set_image(
        pool: &PgPool,
        id: DbId,
        image_url: &str,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET image_url = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a menu item by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of currently available items.
    pub async fn count_available(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE is_available")
            .fetch_one(pool)
            .await
    }

    /// Total number of items.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(pool)
            .await
    }
}
