//! Authentication primitives for the Ampere platform.
//!
//! - **Passwords**: Argon2id hashing and verification for the operator account
//! - **JWT**: HS256-signed bearer tokens for operator sessions
//!
//! Only the human-facing operator channel is authenticated. Power-control
//! units poll without credentials; they cannot perform an interactive login.

use rand::{RngExt, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    HashError(String),
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// ── Password Hashing (Argon2id) ─────────────────────────────────────

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    use argon2::{
        Argon2, PasswordHasher,
        password_hash::{SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against an Argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    use argon2::{Argon2, PasswordVerifier, password_hash::PasswordHash};

    let parsed_hash = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

// ── JWT (HS256) ─────────────────────────────────────────────────────

/// Claims embedded in an operator session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the operator username.
    pub sub: String,
    /// Issuer — always "ampere-control".
    pub iss: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued-at time (Unix timestamp).
    pub iat: i64,
}

/// JWT signing/verification context.
pub struct JwtContext {
    encoding_key: jsonwebtoken::EncodingKey,
    decoding_key: jsonwebtoken::DecodingKey,
}

impl JwtContext {
    /// Create a JWT context from a shared signing secret.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding_key: jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a random signing secret and create a JWT context from it.
    /// Returns `(context, secret)` — persist the secret to keep tokens valid
    /// across restarts.
    pub fn generate() -> (Self, String) {
        let secret: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();
        (Self::from_secret(&secret), secret)
    }

    /// Create and sign a JWT token.
    pub fn create_token(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256);
        let token = jsonwebtoken::encode(&header, claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate and decode a JWT token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_issuer(&["ampere-control"]);
        validation.validate_exp = true;

        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(exp: i64, iat: i64) -> Claims {
        Claims {
            sub: "operator".into(),
            iss: "ampere-control".into(),
            exp,
            iat,
        }
    }

    #[test]
    fn password_hash_and_verify() {
        let hash = hash_password("test-password-123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("test-password-123", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn jwt_create_and_verify() {
        let (ctx, _secret) = JwtContext::generate();

        let now = Utc::now().timestamp();
        let token = ctx.create_token(&claims(now + 3600, now)).unwrap();
        let recovered = ctx.verify_token(&token).unwrap();

        assert_eq!(recovered.sub, "operator");
        assert_eq!(recovered.iss, "ampere-control");
    }

    #[test]
    fn jwt_expired_token_rejected() {
        let (ctx, _secret) = JwtContext::generate();

        // Well past the validator's leeway window.
        let now = Utc::now().timestamp();
        let token = ctx.create_token(&claims(now - 3600, now - 7200)).unwrap();
        assert!(ctx.verify_token(&token).is_err());
    }

    #[test]
    fn jwt_wrong_secret_rejected() {
        let ctx1 = JwtContext::from_secret("secret-one");
        let ctx2 = JwtContext::from_secret("secret-two");

        let now = Utc::now().timestamp();
        let token = ctx1.create_token(&claims(now + 3600, now)).unwrap();
        assert!(ctx2.verify_token(&token).is_err());
    }

    #[test]
    fn jwt_context_round_trips_through_secret() {
        let (ctx, secret) = JwtContext::generate();
        let rebuilt = JwtContext::from_secret(&secret);

        let now = Utc::now().timestamp();
        let token = ctx.create_token(&claims(now + 3600, now)).unwrap();
        assert!(rebuilt.verify_token(&token).is_ok());
    }
}
