//! Session token generation and validation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AppError;

/// Session token claims payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id the token was issued to
    pub sub: String,
    /// Issued at (UTC timestamp)
    pub iat: u64,
    /// Expiration (UTC timestamp)
    pub exp: u64,
}

/// Generate a signed session token for an account
///
/// Pure function of the secret and the clock; nothing is persisted.
pub fn generate_token(
    account_id: &str,
    secret: &str,
    lifetime_seconds: u64,
) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        sub: account_id.to_string(),
        iat: now,
        exp: now + lifetime_seconds,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate and decode a session token
///
/// Verification is binary: a bad signature, malformed payload, or
/// elapsed expiry all surface as `Unauthenticated`.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // No clock tolerance: a token is invalid the second its expiry passes
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Token validation failed: {e}");
        AppError::Unauthenticated("Not authorized, token invalid or expired")
    })?;

    Ok(token_data.claims)
}
