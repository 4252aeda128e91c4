//! Guard chain
//!
//! An ordered list of independent credential strategies, built once from
//! configuration and tried in turn for every protected request. The first
//! strategy that accepts wins; if all reject, the caller gets a single
//! opaque `Unauthorized`.

mod api_key;
mod bearer;
mod chain;
mod cookie;
mod jwks;
mod request;
mod strategy;

#[cfg(test)]
mod tests;

pub use api_key::ApiKeyStrategy;
pub use bearer::BearerStrategy;
pub use chain::{GuardChain, GuardDecision};
pub use cookie::AccessCookieStrategy;
pub use jwks::{Jwk, Jwks, JwksStrategy};
pub use request::AuthRequest;
pub use strategy::AuthStrategy;
