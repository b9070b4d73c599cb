use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Name of the session cookie carried by clients
pub const SESSION_COOKIE_NAME: &str = "token";

/// Build the session cookie carrying a freshly issued token
///
/// HTTP-only always; `secure` only in production so local development
/// over plain HTTP keeps working.
pub fn session_cookie<'a>(token: String, max_age_seconds: u64, secure: bool) -> Cookie<'a> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_seconds as i64))
        .build()
}

/// Build an immediately-expired session cookie for logout
pub fn expired_session_cookie<'a>() -> Cookie<'a> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .build()
}
