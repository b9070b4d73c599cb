use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::auth::cookie::SESSION_COOKIE_NAME;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::routes::AppState;
use crate::store::users;

/// Verified identity attached to the request after authentication
///
/// Carries the public account fields only; the password hash stays
/// behind the store adapter.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Authentication middleware guarding every protected route
///
/// Extracts the session cookie, validates the token, resolves the
/// embedded account id against the store, and inserts `CurrentUser`
/// as a request extension. A missing token, a failed validation, and
/// an orphaned account id all reject with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(SESSION_COOKIE_NAME).map(|cookie| cookie.value()) else {
        tracing::debug!("Missing session cookie");
        return AppError::Unauthenticated("Not authorized, token missing").into_response();
    };

    let claims = match validate_token(token, &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    // A token can outlive its account; treat that the same as an
    // invalid token rather than leaking that the account existed.
    let user = match users::find_by_id(&state.pool, &claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("Valid token for unknown account {}", claims.sub);
            return AppError::Unauthenticated("Not authorized, token invalid or expired")
                .into_response();
        }
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
        email: user.email,
    });

    next.run(req).await
}
