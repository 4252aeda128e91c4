//! Configuration for the token service

use gk_shared::JwtConfig;

/// Secrets and lifetimes used by [`TokenService`](super::TokenService)
///
/// Read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 secret for access tokens
    pub access_token_secret: String,
    /// HS256 secret for refresh cookies
    pub refresh_cookie_secret: String,
    /// Access token lifetime and minimum rotation interval (ms)
    pub access_token_ttl_ms: i64,
    /// Refresh cookie `exp` horizon (ms)
    pub refresh_token_ttl_ms: i64,
    /// Absolute session lifetime from login (ms)
    pub cookie_max_age_ms: i64,
    /// Issuer written to and required on access tokens
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_token_secret: jwt.access_token_secret.clone(),
            refresh_cookie_secret: jwt.refresh_cookie_secret.clone(),
            access_token_ttl_ms: jwt.access_token_ttl_ms,
            refresh_token_ttl_ms: jwt.refresh_token_ttl_ms,
            cookie_max_age_ms: jwt.cookie_max_age_ms,
            issuer: jwt.issuer.clone(),
        }
    }
}

impl TokenServiceConfig {
    /// Access token lifetime in whole seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl_ms / 1000
    }

    pub fn refresh_token_ttl_secs(&self) -> i64 {
        self.refresh_token_ttl_ms / 1000
    }

    /// Refresh cookie `Max-Age` in seconds
    pub fn cookie_max_age_secs(&self) -> i64 {
        self.cookie_max_age_ms / 1000
    }
}
