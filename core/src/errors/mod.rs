//! Domain error types.
//!
//! `DomainError` is the service-level taxonomy; `TokenError` is the flat set
//! of outcomes a single credential check can end in. Both are mapped to an
//! opaque status at the HTTP boundary, so their messages are for logs only.

use thiserror::Error;

/// Terminal outcomes of a credential check
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature or format is invalid")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token identifier is no longer live")]
    JtiNotLive,

    #[error("Token subject is no longer live")]
    SubjectNotLive,

    #[error("No credential presented")]
    Missing,
}

impl TokenError {
    /// Stable name used in structured log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::JtiNotLive => "jti_not_live",
            TokenError::SubjectNotLive => "subject_not_live",
            TokenError::Missing => "missing",
        }
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Bad input: {message}")]
    BadInput { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Refreshing too soon")]
    Throttled,

    #[error("Cookie has expired")]
    Expired,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to credential check outcomes
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        DomainError::BadInput {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
