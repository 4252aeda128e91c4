use async_trait::async_trait;

use crate::domain::value_objects::Principal;
use crate::errors::TokenError;

use super::request::AuthRequest;

/// One credential scheme in the guard chain
///
/// A strategy verifies signature and expiry of its own credential and then
/// performs the liveness check. It never short-circuits the chain on
/// failure; the chain decides.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Stable name used in logs
    fn name(&self) -> &'static str;

    /// Bearer and access-cookie strategies; a chain needs at least one
    fn is_primary(&self) -> bool {
        false
    }

    async fn validate(&self, request: &AuthRequest) -> Result<Principal, TokenError>;
}
