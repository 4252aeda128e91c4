//! # Infrastructure Layer
//!
//! Concrete implementations of the core's storage seams:
//! - **Database**: MySQL refresh session, user and API key repositories using SQLx
//! - **Cache**: Redis-backed liveness cache
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use std::sync::Arc;

use gk_core::errors::DomainError;
use gk_shared::{CacheConfig, DatabaseConfig};

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and liveness cache
#[cfg(feature = "redis-cache")]
pub mod cache;

#[cfg(all(feature = "mysql", feature = "redis-cache"))]
pub use bootstrap::Infrastructure;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(all(feature = "mysql", feature = "redis-cache"))]
mod bootstrap {
    use super::*;
    use crate::cache::{RedisClient, RedisTokenCache};
    use crate::database::{
        DatabasePool, MySqlApiKeyRepository, MySqlRefreshSessionRepository, MySqlUserRepository,
    };

    /// Connected storage backends, ready to be injected into the core services
    #[derive(Clone)]
    pub struct Infrastructure {
        pub pool: DatabasePool,
        pub cache: Arc<RedisTokenCache>,
        pub sessions: Arc<MySqlRefreshSessionRepository>,
        pub users: Arc<MySqlUserRepository>,
        pub api_keys: Arc<MySqlApiKeyRepository>,
    }

    impl Infrastructure {
        /// Connect to MySQL and Redis and apply pending migrations
        pub async fn connect(
            database: &DatabaseConfig,
            cache: &CacheConfig,
        ) -> Result<Self, InfrastructureError> {
            tracing::info!("Initializing infrastructure services...");

            let pool = DatabasePool::new(database.clone()).await?;
            pool.run_migrations().await?;

            let redis = RedisClient::new(cache.clone()).await?;
            let cache = Arc::new(RedisTokenCache::new(redis, cache));

            let sql = pool.get_pool().clone();
            let infra = Self {
                sessions: Arc::new(MySqlRefreshSessionRepository::new(sql.clone())),
                users: Arc::new(MySqlUserRepository::new(sql.clone())),
                api_keys: Arc::new(MySqlApiKeyRepository::new(sql)),
                cache,
                pool,
            };

            tracing::info!("Infrastructure services initialized successfully");
            Ok(infra)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_internal() {
        let err: DomainError = InfrastructureError::Config("bad url".into()).into();
        match err {
            DomainError::Internal { message } => {
                assert_eq!(message, "Configuration error: bad url")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
