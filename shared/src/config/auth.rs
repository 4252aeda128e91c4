//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

const DEFAULT_ACCESS_SECRET: &str = "development-access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "development-refresh-secret-change-in-production";

/// JWT signing configuration
///
/// All durations are milliseconds. Signed claims carry seconds; the
/// conversion happens in the token service at sign/verify time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_token_secret: String,

    /// Secret used to sign refresh cookies (must differ from the access secret)
    pub refresh_cookie_secret: String,

    /// Access token lifetime; also the minimum interval between rotations
    pub access_token_ttl_ms: i64,

    /// Lifetime of a single refresh cookie
    pub refresh_token_ttl_ms: i64,

    /// Absolute lifetime of a refresh session, measured from login
    pub cookie_max_age_ms: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_cookie_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_ttl_ms: 15 * 60 * 1000,           // 15 minutes
            refresh_token_ttl_ms: 7 * 24 * 60 * 60 * 1000, // 7 days
            cookie_max_age_ms: 30 * 24 * 60 * 60 * 1000,   // 30 days
            issuer: String::from("gatekeeper"),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with explicit secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_token_secret: access_secret.into(),
            refresh_cookie_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_ms = minutes * 60 * 1000;
        self
    }

    /// Set absolute session lifetime in days
    pub fn with_cookie_max_age_days(mut self, days: i64) -> Self {
        self.cookie_max_age_ms = days * 24 * 60 * 60 * 1000;
        self
    }

    /// Check if either secret is still the development default
    pub fn is_using_default_secret(&self) -> bool {
        self.access_token_secret == DEFAULT_ACCESS_SECRET
            || self.refresh_cookie_secret == DEFAULT_REFRESH_SECRET
    }

    /// Access token lifetime in whole seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl_ms / 1000
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_secret.is_empty() || self.refresh_cookie_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT secrets must not be empty".into()));
        }
        if self.access_token_secret == self.refresh_cookie_secret {
            return Err(ConfigError::Invalid(
                "access token and refresh cookie secrets must differ".into(),
            ));
        }
        if self.access_token_ttl_ms <= 0
            || self.refresh_token_ttl_ms <= 0
            || self.cookie_max_age_ms <= 0
        {
            return Err(ConfigError::Invalid("token lifetimes must be positive".into()));
        }
        // Claims carry whole seconds; a shorter lifetime signs exp == iat
        if self.access_token_ttl_ms < 1000 || self.refresh_token_ttl_ms < 1000 {
            return Err(ConfigError::Invalid(
                "token lifetimes must be at least one second".into(),
            ));
        }
        Ok(())
    }
}

/// Refresh cookie attributes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Refresh cookie name
    pub refresh_cookie_name: String,

    /// Access token cookie name (read by the access-cookie guard)
    pub access_cookie_name: String,

    /// Path the refresh cookie is scoped to
    pub path: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            refresh_cookie_name: String::from("refresh_token"),
            access_cookie_name: String::from("access_token"),
            path: String::from("/api/v1/auth"),
            secure: false, // Set to true in production
        }
    }
}

/// Which guard strategies are enabled, in fixed order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuardConfig {
    #[serde(default = "default_true")]
    pub bearer: bool,

    #[serde(default)]
    pub access_cookie: bool,

    #[serde(default)]
    pub jwks: bool,

    #[serde(default)]
    pub api_key: bool,

    /// Header carrying `<id>.<secret>` API keys
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            bearer: true,
            access_cookie: true,
            jwks: false,
            api_key: false,
            api_key_header: default_api_key_header(),
        }
    }
}

impl GuardConfig {
    /// At least one of bearer / access-cookie must be enabled
    pub fn has_primary_scheme(&self) -> bool {
        self.bearer || self.access_cookie
    }
}

/// Federated issuer publishing RS256 keys
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwksConfig {
    /// URL of the JSON Web Key Set
    pub url: String,

    /// Expected `iss` claim of federated tokens
    pub issuer: String,

    /// How long fetched keys are cached, in seconds
    #[serde(default = "default_jwks_cache_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for JwksConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:8081/.well-known/jwks.json"),
            issuer: String::from("gatekeeper-federated"),
            cache_ttl_secs: default_jwks_cache_secs(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    #[serde(default)]
    pub cookie: CookieConfig,

    #[serde(default)]
    pub guard: GuardConfig,

    #[serde(default)]
    pub jwks: JwksConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            access_token_secret: std::env::var("JWT_ACCESS_SECRET")
                .unwrap_or(defaults.access_token_secret),
            refresh_cookie_secret: std::env::var("JWT_REFRESH_SECRET")
                .unwrap_or(defaults.refresh_cookie_secret),
            access_token_ttl_ms: env_i64("JWT_ACCESS_TTL_MS", defaults.access_token_ttl_ms),
            refresh_token_ttl_ms: env_i64("JWT_REFRESH_TTL_MS", defaults.refresh_token_ttl_ms),
            cookie_max_age_ms: env_i64("COOKIE_MAX_AGE_MS", defaults.cookie_max_age_ms),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        let guard = GuardConfig {
            bearer: env_bool("GUARD_BEARER", true),
            access_cookie: env_bool("GUARD_ACCESS_COOKIE", true),
            jwks: env_bool("GUARD_JWKS", false),
            api_key: env_bool("GUARD_API_KEY", false),
            api_key_header: default_api_key_header(),
        };

        let mut jwks = JwksConfig::default();
        if let Ok(url) = std::env::var("JWKS_URL") {
            jwks.url = url;
        }
        if let Ok(issuer) = std::env::var("JWKS_ISSUER") {
            jwks.issuer = issuer;
        }

        Self {
            jwt,
            cookie: CookieConfig {
                secure: env_bool("COOKIE_SECURE", false),
                ..Default::default()
            },
            guard,
            jwks,
        }
    }

    /// Validate invariants that must hold before any service is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if !self.guard.has_primary_scheme() {
            return Err(ConfigError::Invalid(
                "at least one of the bearer or access-cookie guards must be enabled".into(),
            ));
        }
        Ok(())
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_true() -> bool {
    true
}

fn default_api_key_header() -> String {
    String::from("X-API-Key")
}

fn default_jwks_cache_secs() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_ttl_ms, 900_000);
        assert_eq!(config.access_token_ttl_secs(), 900);
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("access-secret", "refresh-secret")
            .with_access_ttl_minutes(5)
            .with_cookie_max_age_days(1);

        assert_eq!(config.access_token_ttl_ms, 300_000);
        assert_eq!(config.cookie_max_age_ms, 86_400_000);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_identical_secrets_rejected() {
        let config = JwtConfig::new("same", "same");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = JwtConfig::new("", "refresh");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sub_second_access_ttl_rejected() {
        let mut config = JwtConfig::new("access", "refresh");
        config.access_token_ttl_ms = 999;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.access_token_ttl_ms = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_guard_requires_primary_scheme() {
        let mut config = AuthConfig::default();
        config.guard.bearer = false;
        config.guard.access_cookie = false;
        config.guard.api_key = true;

        assert!(config.validate().is_err());

        config.guard.access_cookie = true;
        assert!(config.validate().is_ok());
    }
}
