pub mod auth;
pub mod extract;
pub mod health;
pub mod tasks;

use sqlx::SqlitePool;

use crate::config::Config;

pub use auth::{get_logout, get_profile, post_login, post_register};
pub use health::{health, ready};
pub use tasks::{delete_task, get_tasks, post_task, put_task};

/// Shared application state
///
/// Immutable after startup; cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}
