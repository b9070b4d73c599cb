//! Register, login, logout, and profile handlers
//!
//! Register and login issue the session cookie; logout overwrites it
//! with an expired one. Profile requires the auth middleware to have
//! resolved the caller first.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::auth::cookie::{expired_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::routes::extract::AppJson;
use crate::routes::AppState;
use crate::store::users::{self, User};

/// Report the first violated field, in declaration order
///
/// `ValidationErrors` hands back a map, so ordering has to be imposed
/// here to keep the reported field deterministic.
fn first_validation_error(errors: &ValidationErrors, order: &[&str]) -> AppError {
    let map = errors.field_errors();
    for &field in order {
        if let Some(list) = map.get(field) {
            if let Some(err) = list.first() {
                let message = err
                    .message
                    .clone()
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                return AppError::Validation(message);
            }
        }
    }
    AppError::Validation("Invalid input".to_string())
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Public account fields, never the hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

fn issue_session(state: &AppState, user_id: &str) -> Result<CookieJar, AppError> {
    let token = generate_token(
        user_id,
        &state.config.jwt.secret,
        state.config.jwt.expiration_seconds,
    )?;

    let cookie = session_cookie(
        token,
        state.config.jwt.expiration_seconds,
        state.config.server.is_production(),
    );

    Ok(CookieJar::new().add(cookie))
}

/// POST /api/auth/register
pub async fn post_register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> Result<impl IntoResponse, AppError> {
    input
        .validate()
        .map_err(|e| first_validation_error(&e, &["username", "email", "password"]))?;

    if users::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::DuplicateAccount);
    }

    let user = users::create(&state.pool, &input.username, &input.email, &input.password).await?;

    tracing::info!(user_id = %user.id, "Account registered");

    let jar = issue_session(&state, &user.id)?;

    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(&user))))
}

/// POST /api/auth/login
///
/// The failure path is deliberately the same whether the email is
/// unknown or the password is wrong.
pub async fn post_login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> Result<impl IntoResponse, AppError> {
    input
        .validate()
        .map_err(|e| first_validation_error(&e, &["email", "password"]))?;

    let user = users::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !users::verify_password(&user, &input.password)? {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "Login succeeded");

    let jar = issue_session(&state, &user.id)?;

    Ok((StatusCode::OK, jar, Json(UserResponse::from(&user))))
}

/// GET /api/auth/logout
///
/// Unconditionally succeeds, even without an existing session.
pub async fn get_logout() -> impl IntoResponse {
    let jar = CookieJar::new().add(expired_session_cookie());

    (
        StatusCode::OK,
        jar,
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// GET /api/auth/profile (protected)
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    // The account can vanish between middleware resolution and here;
    // surface that as 404 rather than 500.
    let user = users::find_by_id(&state.pool, &current.id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(ProfileResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }))
}
