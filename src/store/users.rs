//! Account store adapter
//!
//! Owns everything that touches the `users` table, including password
//! hashing on the way in. The hash never leaves this module's `User`
//! struct; response shaping strips it at the route layer.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::password;
use crate::error::AppError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Create an account, hashing the password before it is persisted
///
/// A unique-constraint violation on email surfaces as `DuplicateAccount`.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let password_hash = password::hash_password(password)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.created_at)
    .execute(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateAccount,
        _ => AppError::Database(e),
    })?;

    Ok(user)
}

/// Verify a submitted password against the stored hash
pub fn verify_password(user: &User, password: &str) -> Result<bool, AppError> {
    Ok(password::verify_password(password, &user.password_hash)?)
}
