//! API key entity for machine clients.

use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

use super::token::sha256_hex;

/// An API key presented as `<id>.<secret>`; only the secret's hash is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,

    /// Subject the key acts on behalf of
    pub subject: String,

    pub roles: Vec<String>,

    /// SHA-256 hex of the secret part
    pub key_hash: String,

    pub active: bool,

    /// Optional expiry (milliseconds)
    pub expires_at: Option<i64>,
}

impl ApiKey {
    /// Creates an active, non-expiring key from its plaintext secret
    pub fn new(id: impl Into<String>, subject: impl Into<String>, secret: &str, roles: Vec<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            roles,
            key_hash: Self::hash_secret(secret),
            active: true,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at_ms: i64) -> Self {
        self.expires_at = Some(expires_at_ms);
        self
    }

    pub fn hash_secret(secret: &str) -> String {
        sha256_hex(secret.as_bytes())
    }

    /// Constant-time comparison of the presented secret against the stored hash
    pub fn matches_secret(&self, secret: &str) -> bool {
        let presented = Self::hash_secret(secret);
        constant_time_eq(presented.as_bytes(), self.key_hash.as_bytes())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at.is_some_and(|at| now_ms >= at)
    }
}
