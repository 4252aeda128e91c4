//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Refresh session, user and API key repositories

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlApiKeyRepository, MySqlRefreshSessionRepository, MySqlUserRepository};
