//! Repository for the `categories` table.

use sqlx::PgPool;
use tavola_core::types::DbId;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, slug, description, display_order, is_active, created_at";

/// Provides CRUD operations for menu categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Create a new category with a server-derived slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
        slug: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, description, display_order, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(input.display_order.unwrap_or(0))
            .bind(input.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All categories in display order, for the admin listing.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY display_order, name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Active categories with their available-item counts, for the
    /// public categories endpoint.
    pub async fn list_active_with_counts(
        pool: &PgPool,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.slug, c.description,
                    COUNT(m.id) FILTER (WHERE m.is_available) AS item_count
             FROM categories c
             LEFT JOIN menu_items m ON m.category_id = c.id
             WHERE c.is_active
             GROUP BY c.id
             ORDER BY c.display_order, c.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a category by ID, returning the updated row. When the name
    /// changes the caller passes a freshly derived slug.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
        slug: Option<&str>,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                display_order = COALESCE($5, display_order),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Number of menu items still referencing a category.
    pub async fn menu_item_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE category_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
