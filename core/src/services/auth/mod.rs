//! Authentication service module
//!
//! Credential checks at login and subject resolution for refresh cookies.

mod hasher;
mod service;

#[cfg(test)]
mod tests;

pub use hasher::{BcryptPasswordHasher, PasswordHasher};
pub use service::AuthenticationService;
