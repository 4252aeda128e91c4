//! Token claim sets and liveness cache key layout.
//!
//! Signed claims carry `iat`/`exp` in seconds. Everything persisted or cached
//! is measured in milliseconds.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

/// Cache namespace marking a token identifier as live
pub const JWT_JTI_PREFIX: &str = "JWT_JTI:";

/// Cache namespace marking a subject as live
pub const USER_SUBJECT_PREFIX: &str = "USER_SUBJECT:";

/// Value stored under both liveness namespaces
pub const LIVE_MARKER: &str = "true";

/// Cache key for token liveness
pub fn jti_key(jti: &str) -> String {
    format!("{}{}", JWT_JTI_PREFIX, jti)
}

/// Cache key for subject liveness
pub fn subject_key(subject: &str) -> String {
    format!("{}{}", USER_SUBJECT_PREFIX, subject)
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Claims of a short-lived bearer access token
///
/// Federated RS256 tokens accepted by the JWKS guard share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,

    /// Roles granted to the subject
    #[serde(default)]
    pub roles: Vec<String>,

    /// Unique token id, also the liveness cache key
    pub jti: String,

    /// Issued at (seconds)
    pub iat: i64,

    /// Expiration (seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl AccessClaims {
    /// Whether `exp` has passed at `now_secs`
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }
}

/// Claims of a refresh cookie
///
/// Sessions are correlated to a cookie only through [`RefreshClaims::hash`];
/// the claims themselves are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }

    /// SHA-256 hex of the canonical JSON serialization
    pub fn hash(&self) -> DomainResult<String> {
        let canonical = serde_json::to_vec(self)
            .map_err(|e| DomainError::internal(format!("failed to serialize claims: {}", e)))?;
        Ok(sha256_hex(&canonical))
    }
}

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub jti: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}
