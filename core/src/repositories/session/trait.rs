//! Refresh session repository trait.

use async_trait::async_trait;

use crate::domain::entities::session::RefreshSession;
use crate::errors::DomainError;

/// Persistence contract for refresh sessions
///
/// `jti` and `hash` are unique across all sessions. Implementations must
/// make [`rotate`](RefreshSessionRepository::rotate) atomic: the row is
/// updated only if its stored `version` still equals `expected_version`.
#[async_trait]
pub trait RefreshSessionRepository: Send + Sync {
    /// Find the session whose current cookie hashes to `hash`
    async fn find_by_hash(&self, hash: &str) -> Result<Option<RefreshSession>, DomainError>;

    /// Find the session whose current cookie id is `jti`
    async fn find_by_jti(&self, jti: &str) -> Result<Option<RefreshSession>, DomainError>;

    /// Find the most recently created session of `subject`
    async fn find_by_subject(&self, subject: &str) -> Result<Option<RefreshSession>, DomainError>;

    /// Persist a new session and return it with its assigned id
    ///
    /// # Returns
    /// * `Err(DomainError::Internal)` - `jti` or `hash` already present
    async fn save(&self, session: RefreshSession) -> Result<RefreshSession, DomainError>;

    /// Overwrite `jti`, `hash`, `last_refreshed_at` and `version` of the row
    /// identified by `session.id`
    ///
    /// # Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - Row missing or its version moved on (lost race)
    async fn rotate(&self, session: &RefreshSession, expected_version: i64) -> Result<bool, DomainError>;

    /// Delete the session row
    async fn remove(&self, session: &RefreshSession) -> Result<(), DomainError>;

    /// Delete every session of `subject` and return how many rows went away
    async fn remove_by_subject(&self, subject: &str) -> Result<u64, DomainError>;
}
