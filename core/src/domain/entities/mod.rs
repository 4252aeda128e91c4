//! Domain entities representing core business objects.

pub mod api_key;
pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use api_key::ApiKey;
pub use session::RefreshSession;
pub use token::{
    jti_key, sha256_hex, subject_key, AccessClaims, IssuedAccessToken, RefreshClaims,
    JWT_JTI_PREFIX, LIVE_MARKER, USER_SUBJECT_PREFIX,
};
pub use user::User;
