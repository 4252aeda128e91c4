//! Token service module
//!
//! Issues access tokens, issues and rotates refresh cookies, and revokes
//! sessions. Liveness of every issued credential is tracked in the
//! [`TokenCache`](crate::services::cache::TokenCache).

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{decode_unverified, TokenService};
