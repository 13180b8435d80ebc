//! Password hashing and signed-token issuance.
//!
//! Customer and admin tokens are both HS256 JWTs signed with the configured
//! secret, but carry different claim sets; an admin token is recognized by
//! its `role` claim, so a customer token never passes the admin check.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// Tokens expire one hour after issuance.
const TOKEN_TTL_SECS: i64 = 3600;

const ADMIN_ROLE: &str = "admin";

/// Claims embedded in a customer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User id, stringified
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued-at, seconds since epoch
    pub iat: i64,
}

/// Claims embedded in an admin token. The admin identity is a configured
/// credential pair rather than a `users` row, so only the login name and
/// role are carried.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminClaims {
    /// Admin login name
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Hash a plain-text password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plain-text password against a stored argon2 hash.
///
/// A mismatch is an `Ok(false)`; only a malformed stored hash or an
/// internal hasher failure is an error.
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ApiError::Internal(format!("Invalid stored password hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ApiError::Internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}

/// Issue a signed customer token embedding id, username, and email.
pub fn issue_user_token(
    secret: &str,
    id: i32,
    username: &str,
    email: &str,
) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token signing failed: {e}")))
}

/// Issue a signed admin token for the configured admin login name.
pub fn issue_admin_token(secret: &str, username: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = AdminClaims {
        sub: username.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token signing failed: {e}")))
}

/// Decode and validate an admin token. Fails on a bad signature, expiry,
/// a token missing admin claims, or the wrong role.
pub fn verify_admin_token(secret: &str, token: &str) -> Result<AdminClaims, ApiError> {
    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Unauthorized".to_string()))?;

    if data.claims.role != ADMIN_ROLE {
        return Err(ApiError::Auth("Unauthorized".to_string()));
    }
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password(&hash, "hunter2").unwrap());
        assert!(!verify_password(&hash, "hunter3").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_admin_token_roundtrip() {
        let token = issue_admin_token(SECRET, "admin").unwrap();
        let claims = verify_admin_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_admin_token_rejects_wrong_secret() {
        let token = issue_admin_token(SECRET, "admin").unwrap();
        assert!(verify_admin_token("another-secret", &token).is_err());
    }

    #[test]
    fn test_user_token_is_not_an_admin_token() {
        let token = issue_user_token(SECRET, 7, "alice", "alice@example.com").unwrap();
        assert!(verify_admin_token(SECRET, &token).is_err());
    }

    #[test]
    fn test_expired_admin_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: "admin".to_string(),
            role: ADMIN_ROLE.to_string(),
            exp: now - 7200,
            iat: now - 10800,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_admin_token(SECRET, &token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_admin_token(SECRET, "not-a-token").is_err());
    }
}
