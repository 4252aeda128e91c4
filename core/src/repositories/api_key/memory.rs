//! In-memory API key repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::api_key::ApiKey;
use crate::errors::DomainError;

use super::r#trait::ApiKeyRepository;

#[derive(Clone, Default)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<HashMap<String, ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<ApiKey>, DomainError> {
        Ok(self.keys.read().await.get(id).cloned())
    }

    async fn save(&self, key: ApiKey) -> Result<ApiKey, DomainError> {
        self.keys.write().await.insert(key.id.clone(), key.clone());
        Ok(key)
    }
}
