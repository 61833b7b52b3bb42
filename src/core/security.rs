use argon2::password_hash::{Error as HashError, SaltString};
use argon2::{Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::core::config::Settings;

// Argon2id with the OWASP minimum profile: 19 MiB, two passes, one lane.
const MEMORY_KIB: u32 = 19_456;
const PASSES: u32 = 2;
const LANES: u32 = 1;

#[derive(Debug, Error)]
pub(crate) enum SecurityError {
    #[error("password hashing failed")]
    Hashing,
    #[error("stored password hash is malformed")]
    MalformedHash,
    #[error("token signing failed")]
    Signing,
    #[error("token rejected")]
    InvalidToken,
}

/// Payload of every access token: the user id plus issue and expiry instants.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

fn argon2() -> Result<Argon2<'static>, argon2::Error> {
    let params = Params::new(MEMORY_KIB, PASSES, LANES, None)?;
    Ok(Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params))
}

pub(crate) fn hash_password(password: &str) -> Result<String, SecurityError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .map_err(|_| SecurityError::Hashing)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| SecurityError::Hashing)?;
    Ok(hash.to_string())
}

/// `Ok(false)` is a clean mismatch. Only an unparseable stored hash is an error.
pub(crate) fn verify_password(password: &str, stored: &str) -> Result<bool, SecurityError> {
    let parsed = PasswordHash::new(stored).map_err(|_| SecurityError::MalformedHash)?;
    let verdict = argon2()
        .map_err(|_| SecurityError::MalformedHash)?
        .verify_password(password.as_bytes(), &parsed);

    match verdict {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(_) => Err(SecurityError::MalformedHash),
    }
}

/// Signs a token for `user_id` with the configured lifetime.
pub(crate) fn issue_token(user_id: &str, settings: &Settings) -> Result<String, SecurityError> {
    let ttl = i64::try_from(settings.security().token_ttl_minutes).unwrap_or(i64::MAX / 60);
    sign(user_id, settings, Duration::minutes(ttl))
}

fn sign(user_id: &str, settings: &Settings, lifetime: Duration) -> Result<String, SecurityError> {
    let security = settings.security();
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.unix_timestamp(),
        exp: now.saturating_add(lifetime).unix_timestamp(),
    };

    jsonwebtoken::encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(security.secret_key.as_bytes()),
    )
    .map_err(|_| SecurityError::Signing)
}

/// Checks signature, algorithm and expiry. Every failure collapses into
/// [`SecurityError::InvalidToken`] so callers cannot leak which check failed.
pub(crate) fn decode_token(token: &str, settings: &Settings) -> Result<Claims, SecurityError> {
    let security = settings.security();
    let mut validation = Validation::new(security.algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(security.secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| SecurityError::InvalidToken)
}
