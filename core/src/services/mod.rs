//! Business services containing domain logic and use cases.

pub mod auth;
pub mod cache;
pub mod clock;
pub mod guard;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthenticationService, BcryptPasswordHasher, PasswordHasher};
pub use cache::{InMemoryTokenCache, TokenCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use guard::{
    ApiKeyStrategy, AuthRequest, AuthStrategy, BearerStrategy, AccessCookieStrategy, GuardChain,
    GuardDecision, JwksStrategy,
};
pub use token::{TokenService, TokenServiceConfig};

#[cfg(test)]
pub(crate) mod test_support;
