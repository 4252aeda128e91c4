//! The authenticated caller produced by the guard chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential scheme that authenticated a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    Bearer,
    AccessCookie,
    Jwks,
    ApiKey,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Bearer => "bearer",
            AuthScheme::AccessCookie => "access_cookie",
            AuthScheme::Jwks => "jwks",
            AuthScheme::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub subject: String,
    pub roles: Vec<String>,
    pub scheme: AuthScheme,
    /// Token id, absent for API keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Principal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
