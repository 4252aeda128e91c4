//! # Gatekeeper Core
//!
//! Domain layer for the Gatekeeper authentication backend: token and
//! refresh-cookie lifecycle, credential checks, the cache-backed liveness
//! model and the guard chain that authorizes protected requests.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{ApiKey, AuthScheme, Credentials, Principal, RefreshSession, User};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{ApiKeyRepository, RefreshSessionRepository, UserRepository};
pub use services::{
    AuthenticationService, Clock, GuardChain, GuardDecision, TokenCache, TokenService,
};
