//! Task store adapter
//!
//! `user_id` is set once at creation and never touched by updates.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: String,
    pub created_at: String,
}

/// List every task owned by the given account, oldest first
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, completed, user_id, created_at \
         FROM tasks WHERE user_id = ?1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, completed, user_id, created_at \
         FROM tasks WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

pub async fn create(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<Task, AppError> {
    let task = Task {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.map(|d| d.to_string()),
        completed: false,
        user_id: user_id.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO tasks (id, title, description, completed, user_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.completed)
    .bind(&task.user_id)
    .bind(&task.created_at)
    .execute(pool)
    .await?;

    Ok(task)
}

/// Persist the mutable fields of an already-loaded task
pub async fn update(pool: &SqlitePool, task: &Task) -> Result<(), AppError> {
    sqlx::query("UPDATE tasks SET title = ?1, description = ?2, completed = ?3 WHERE id = ?4")
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(&task.id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM tasks WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
