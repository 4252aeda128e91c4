//! In-memory refresh session repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::RefreshSession;
use crate::errors::DomainError;

use super::r#trait::RefreshSessionRepository;

/// Session store backed by a map keyed on row id
#[derive(Clone)]
pub struct InMemoryRefreshSessionRepository {
    sessions: Arc<RwLock<HashMap<i64, RefreshSession>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRefreshSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemoryRefreshSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshSessionRepository for InMemoryRefreshSessionRepository {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<RefreshSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().find(|s| s.hash == hash).cloned())
    }

    async fn find_by_jti(&self, jti: &str) -> Result<Option<RefreshSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().find(|s| s.jti == jti).cloned())
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<RefreshSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.subject == subject)
            .max_by_key(|s| (s.created_at, s.id))
            .cloned())
    }

    async fn save(&self, mut session: RefreshSession) -> Result<RefreshSession, DomainError> {
        let mut sessions = self.sessions.write().await;

        if sessions
            .values()
            .any(|s| s.hash == session.hash || s.jti == session.jti)
        {
            return Err(DomainError::internal("refresh session jti or hash already exists"));
        }

        session.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn rotate(&self, session: &RefreshSession, expected_version: i64) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;

        if sessions
            .values()
            .any(|s| s.id != session.id && (s.hash == session.hash || s.jti == session.jti))
        {
            return Err(DomainError::internal("refresh session jti or hash already exists"));
        }

        match sessions.get_mut(&session.id) {
            Some(stored) if stored.version == expected_version => {
                stored.jti = session.jti.clone();
                stored.hash = session.hash.clone();
                stored.last_refreshed_at = session.last_refreshed_at;
                stored.version = expected_version + 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove(&self, session: &RefreshSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&session.id);
        Ok(())
    }

    async fn remove_by_subject(&self, subject: &str) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.subject != subject);
        Ok((before - sessions.len()) as u64)
    }
}
