//! Authentication building blocks: JWT access tokens, argon2id password
//! hashing, and startup seeding of the initial admin account.

pub mod jwt;
pub mod password;

use tavola_db::models::user::CreateUser;
use tavola_db::repositories::UserRepo;
use tavola_db::DbPool;

use crate::error::AppError;

/// Ensure the admin account from the environment exists.
///
/// Reads `ADMIN_USERNAME` / `ADMIN_EMAIL` / `ADMIN_PASSWORD` and creates
/// the user with role `admin` when no user with that username exists.
/// Skips silently when `ADMIN_PASSWORD` is unset so a fresh checkout can
/// boot without secrets.
pub async fn seed_admin_from_env(pool: &DbPool) -> Result<(), AppError> {
    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        tracing::warn!("ADMIN_PASSWORD not set; skipping admin account seeding");
        return Ok(());
    };

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@tavola.local".to_string());

    if UserRepo::find_by_username(pool, &username).await?.is_some() {
        return Ok(());
    }

    let password_hash = password::hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username,
            email,
            password_hash,
            role: "admin".to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Admin account seeded");
    Ok(())
}
