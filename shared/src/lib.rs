//! Shared configuration and common types for the Gatekeeper server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use crate::config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, CookieConfig, DatabaseConfig, Environment,
    GuardConfig, JwksConfig, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use crate::errors::{error_codes, ErrorResponse};
