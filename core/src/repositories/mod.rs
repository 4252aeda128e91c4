//! Repository traits and in-memory implementations.
//!
//! SQL-backed implementations live in the infrastructure crate.

pub mod api_key;
pub mod session;
pub mod user;

pub use api_key::{ApiKeyRepository, InMemoryApiKeyRepository};
pub use session::{InMemoryRefreshSessionRepository, RefreshSessionRepository};
pub use user::{InMemoryUserRepository, UserRepository};
