//! Web server wiring

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::auth_middleware;
use crate::config::Config;
use crate::routes::{
    delete_task, get_logout, get_profile, get_tasks, health, post_login, post_register, post_task,
    put_task, ready, AppState,
};

/// Start the HTTP server
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let cors = CorsLayer::new()
        .allow_origin(config.server.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState { pool, config };
    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router
///
/// Protected routes sit behind the auth middleware; register, login,
/// logout, and the probes stay public.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/profile", get(get_profile))
        .route("/api/tasks", get(get_tasks).post(post_task))
        .route("/api/tasks/{id}", put(put_task))
        .route("/api/tasks/{id}", delete(delete_task))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api/auth/register", post(post_register))
        .route("/api/auth/login", post(post_login))
        .route("/api/auth/logout", get(get_logout))
        .merge(protected)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::error::suppress_error_detail,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
