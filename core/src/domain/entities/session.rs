//! Refresh session entity: one row per active login.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persistent record backing a refresh cookie
///
/// `jti`, `hash` and `last_refreshed_at` are overwritten on every rotation;
/// no history is kept. `version` is bumped on each rotation and used for
/// compare-and-swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSession {
    /// Store-assigned row id (0 until saved)
    pub id: i64,

    /// Stable public identifier
    pub uuid: Uuid,

    /// Login time (milliseconds)
    pub created_at: i64,

    /// Id of the currently valid cookie
    pub jti: String,

    /// Owning subject
    pub subject: String,

    /// SHA-256 hex of the current cookie claims
    pub hash: String,

    /// Last successful rotation, or login time (milliseconds)
    pub last_refreshed_at: i64,

    pub version: i64,
}

impl RefreshSession {
    /// New unsaved session created at login
    pub fn new(subject: impl Into<String>, jti: String, hash: String, now_ms: i64) -> Self {
        Self {
            id: 0,
            uuid: Uuid::new_v4(),
            created_at: now_ms,
            jti,
            subject: subject.into(),
            hash,
            last_refreshed_at: now_ms,
            version: 0,
        }
    }

    /// Absolute lifetime exceeded (strictly greater than max age)
    pub fn is_expired(&self, now_ms: i64, cookie_max_age_ms: i64) -> bool {
        now_ms - self.created_at > cookie_max_age_ms
    }

    /// Inside the minimum interval between rotations
    pub fn is_throttled(&self, now_ms: i64, access_token_ttl_ms: i64) -> bool {
        now_ms - self.last_refreshed_at < access_token_ttl_ms
    }

    /// Copy of this session carrying a new cookie identity
    pub fn rotated(&self, jti: String, hash: String, now_ms: i64) -> Self {
        Self {
            jti,
            hash,
            last_refreshed_at: now_ms,
            version: self.version + 1,
            ..self.clone()
        }
    }
}
