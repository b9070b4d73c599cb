pub mod auth;
pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod server;
pub mod store;

pub use config::Config;
pub use routes::AppState;

/// Create the app router for a given pool and config
///
/// Used by the server and by integration tests, which drive the
/// router directly with `tower::ServiceExt::oneshot` instead of
/// binding a listener.
pub fn create_app(pool: sqlx::SqlitePool, config: Config) -> axum::Router {
    server::create_router(AppState { pool, config })
}
