//! MySQL repository implementations

pub mod api_key_repository_impl;
pub mod refresh_session_repository_impl;
pub mod user_repository_impl;

pub use api_key_repository_impl::MySqlApiKeyRepository;
pub use refresh_session_repository_impl::MySqlRefreshSessionRepository;
pub use user_repository_impl::MySqlUserRepository;

use gk_core::errors::DomainError;

/// Wrap a driver error with the failed operation
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}

/// Unique-key violation on insert
pub(crate) fn is_duplicate(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Roles are stored as a JSON array in a TEXT column
pub(crate) fn encode_roles(roles: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(roles).map_err(|e| DomainError::Internal {
        message: format!("Failed to encode roles: {}", e),
    })
}

pub(crate) fn decode_roles(raw: &str) -> Result<Vec<String>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| DomainError::Internal {
        message: format!("Invalid roles column: {}", e),
    })
}
