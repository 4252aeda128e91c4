use async_trait::async_trait;
use gk_core::errors::DomainError;
use gk_core::services::TokenCache;
use gk_shared::CacheConfig;

use super::RedisClient;

/// `TokenCache` over a shared Redis, keys namespaced by the configured prefix
#[derive(Clone)]
pub struct RedisTokenCache {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisTokenCache {
    pub fn new(client: RedisClient, config: &CacheConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    pub async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.client.health_check().await?)
    }
}

/// Negative or zero TTLs become the shortest expiry Redis accepts
pub(crate) fn ttl_to_px(ttl_ms: Option<i64>) -> Option<u64> {
    ttl_ms.map(|ms| ms.max(1) as u64)
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.config.make_key(key)).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl_ms: Option<i64>) -> Result<(), DomainError> {
        self.client
            .set(&self.config.make_key(key), value, ttl_to_px(ttl_ms))
            .await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DomainError> {
        self.client.delete(&self.config.make_key(key)).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.config.make_key(key)).await?)
    }
}
