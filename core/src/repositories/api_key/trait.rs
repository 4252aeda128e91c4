//! API key repository trait.

use async_trait::async_trait;

use crate::domain::entities::api_key::ApiKey;
use crate::errors::DomainError;

#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Find a key by its public id
    async fn find_by_id(&self, id: &str) -> Result<Option<ApiKey>, DomainError>;

    /// Store or replace a key
    async fn save(&self, key: ApiKey) -> Result<ApiKey, DomainError>;
}
