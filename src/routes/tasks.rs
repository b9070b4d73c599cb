//! Task CRUD handlers, all behind the auth middleware
//!
//! Reads are scoped to the caller's own tasks. Mutations go through
//! the ownership guard: existence is checked before ownership so a
//! missing task and a foreign task stay distinguishable by status.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::routes::extract::AppJson;
use crate::routes::AppState;
use crate::store::tasks::{self, Task};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskInput {
    #[validate(length(min = 1, message = "Please add a title"))]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    /// Absent means unchanged; an explicit null clears the description
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Ownership guard: load the task, 404 if missing, 401 if the caller
/// does not own it
async fn load_owned_task(
    pool: &SqlitePool,
    id: &str,
    current: &CurrentUser,
) -> Result<Task, AppError> {
    let Some(task) = tasks::find_by_id(pool, id).await? else {
        return Err(AppError::NotFound("Task"));
    };

    if task.user_id != current.id {
        tracing::warn!(
            task_id = %task.id,
            user_id = %current.id,
            "Rejected access to task owned by another account"
        );
        return Err(AppError::NotAuthorized);
    }

    Ok(task)
}

/// GET /api/tasks
pub async fn get_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = tasks::list_for_user(&state.pool, &current.id).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn post_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    AppJson(input): AppJson<CreateTaskInput>,
) -> Result<impl IntoResponse, AppError> {
    input
        .validate()
        .map_err(|_| AppError::Validation("Please add a title".to_string()))?;
    if input.title.trim().is_empty() {
        return Err(AppError::Validation("Please add a title".to_string()));
    }

    let task = tasks::create(
        &state.pool,
        &current.id,
        &input.title,
        input.description.as_deref(),
    )
    .await?;

    tracing::info!(task_id = %task.id, user_id = %current.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn put_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateTaskInput>,
) -> Result<impl IntoResponse, AppError> {
    let mut task = load_owned_task(&state.pool, &id, &current).await?;

    if let Some(title) = input.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Please add a title".to_string()));
        }
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }

    tasks::update(&state.pool, &task).await?;

    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let task = load_owned_task(&state.pool, &id, &current).await?;

    tasks::delete(&state.pool, &task.id).await?;

    tracing::info!(task_id = %task.id, user_id = %current.id, "Task deleted");

    Ok(Json(json!({ "message": "Task removed" })))
}
