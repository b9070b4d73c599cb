#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use taskman::config::{
    Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig,
};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiration_seconds: 3600,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_config(test_config()).await
}

pub async fn create_test_app_with_config(config: Config) -> TestApp {
    let pool = setup_test_db().await;
    let router = taskman::create_app(pool.clone(), config);

    TestApp { router, pool }
}

/// Build a JSON request, optionally carrying a session cookie
pub fn json_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

/// Extract the `token=...` pair from the Set-Cookie header
pub fn session_cookie(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should carry a Set-Cookie header")
        .to_str()
        .unwrap();

    raw.split(';').next().unwrap().to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register an account and return (session cookie, response body)
pub async fn register(
    app: &TestApp,
    username: &str,
    email: &str,
    password: &str,
) -> (String, Value) {
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": username,
                "email": email,
                "password": password,
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = session_cookie(&response);
    let body = body_json(response).await;

    (cookie, body)
}

/// Create a task for the given session and return its body
pub async fn create_task(app: &TestApp, cookie: &str, title: &str) -> Value {
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tasks",
            Some(cookie),
            Some(json!({ "title": title })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await
}
