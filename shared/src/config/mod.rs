//! Configuration module
//!
//! - `auth` - token secrets and lifetimes, cookie attributes, guard strategy flags
//! - `cache` - Redis liveness cache
//! - `database` - MySQL connection pool
//! - `environment` - environment detection and logging
//! - `server` - HTTP server binding

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, CookieConfig, GuardConfig, JwksConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Build configuration purely from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration once at process start
    ///
    /// Precedence, lowest first: environment-derived defaults, an optional
    /// `config.toml` (or the file named by `GK_CONFIG`), then `GK__`-prefixed
    /// environment variables (`GK__AUTH__JWT__ISSUER=...`).
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();

        let file = std::env::var("GK_CONFIG").unwrap_or_else(|_| String::from("config"));
        let defaults = ::config::Config::try_from(&Self::from_env())?;

        let loaded: AppConfig = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::with_name(&file).required(false))
            .add_source(::config::Environment::with_prefix("GK").separator("__"))
            .build()?
            .try_deserialize()?;

        loaded.auth.validate()?;
        Ok(loaded)
    }
}
