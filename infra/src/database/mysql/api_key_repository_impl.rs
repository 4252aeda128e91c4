//! MySQL implementation of the API key store.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use gk_core::domain::entities::ApiKey;
use gk_core::errors::DomainError;
use gk_core::repositories::ApiKeyRepository;

use super::{db_error, decode_roles, encode_roles};

pub struct MySqlApiKeyRepository {
    pool: MySqlPool,
}

impl MySqlApiKeyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_key(row: &MySqlRow) -> Result<ApiKey, DomainError> {
        let roles: String = row
            .try_get("roles")
            .map_err(|e| db_error("Failed to get roles", e))?;

        Ok(ApiKey {
            id: row.try_get("id").map_err(|e| db_error("Failed to get id", e))?,
            subject: row
                .try_get("subject")
                .map_err(|e| db_error("Failed to get subject", e))?,
            roles: decode_roles(&roles)?,
            key_hash: row
                .try_get("key_hash")
                .map_err(|e| db_error("Failed to get key_hash", e))?,
            active: row
                .try_get("active")
                .map_err(|e| db_error("Failed to get active", e))?,
            expires_at: row
                .try_get("expires_at")
                .map_err(|e| db_error("Failed to get expires_at", e))?,
        })
    }
}

#[async_trait]
impl ApiKeyRepository for MySqlApiKeyRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(
            "SELECT id, subject, roles, key_hash, active, expires_at FROM api_keys WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find API key", e))?;

        row.as_ref().map(Self::row_to_key).transpose()
    }

    async fn save(&self, key: ApiKey) -> Result<ApiKey, DomainError> {
        let query = r#"
            INSERT INTO api_keys (id, subject, roles, key_hash, active, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                subject = VALUES(subject),
                roles = VALUES(roles),
                key_hash = VALUES(key_hash),
                active = VALUES(active),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(&key.id)
            .bind(&key.subject)
            .bind(encode_roles(&key.roles)?)
            .bind(&key.key_hash)
            .bind(key.active)
            .bind(key.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save API key", e))?;

        Ok(key)
    }
}
