//! In-process cache with clock-driven expiry

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;
use crate::services::clock::Clock;

use super::traits::TokenCache;

struct Entry {
    value: String,
    expires_at: Option<i64>,
}

/// Cache whose TTLs follow the injected [`Clock`]
#[derive(Clone)]
pub struct InMemoryTokenCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTokenCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = self.clock.now_ms();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at.map_or(true, |at| now < at))
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_ms: Option<i64>) -> Result<(), DomainError> {
        let expires_at = ttl_ms.map(|ttl| self.clock.now_ms() + ttl);
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
