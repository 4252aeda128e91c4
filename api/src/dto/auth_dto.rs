use serde::{Deserialize, Serialize};
use validator::Validate;

use gk_core::domain::value_objects::Credentials;

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Credentials {
        Credentials::new(self.username, self.password)
    }
}

/// Body returned by login and refresh; the refresh cookie travels in `Set-Cookie`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: String::from("Bearer"),
            expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub subject: String,
    pub roles: Vec<String>,
    pub scheme: String,
}
