//! Value objects representing immutable domain concepts.

pub mod credentials;
pub mod principal;

// Re-export commonly used types
pub use credentials::Credentials;
pub use principal::{AuthScheme, Principal};
