use async_trait::async_trait;

use crate::errors::DomainError;

/// TTL key-value cache shared by every replica
///
/// Operations on absent or expired keys are not errors.
#[async_trait]
pub trait TokenCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Store `value`; `ttl_ms` of `None` keeps the entry until deleted
    async fn set(&self, key: &str, value: &str, ttl_ms: Option<i64>) -> Result<(), DomainError>;

    async fn del(&self, key: &str) -> Result<(), DomainError>;

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }
}
