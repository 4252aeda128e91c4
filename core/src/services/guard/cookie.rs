//! Access token carried in a cookie

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::value_objects::{AuthScheme, Principal};
use crate::errors::TokenError;
use crate::repositories::RefreshSessionRepository;
use crate::services::cache::TokenCache;
use crate::services::token::TokenService;

use super::bearer::validate_access_token;
use super::request::AuthRequest;
use super::strategy::AuthStrategy;

/// Same verification as [`BearerStrategy`](super::BearerStrategy), different carrier
pub struct AccessCookieStrategy<R: RefreshSessionRepository, C: TokenCache> {
    tokens: Arc<TokenService<R, C>>,
    cookie_name: String,
}

impl<R: RefreshSessionRepository, C: TokenCache> AccessCookieStrategy<R, C> {
    pub fn new(tokens: Arc<TokenService<R, C>>, cookie_name: impl Into<String>) -> Self {
        Self {
            tokens,
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl<R, C> AuthStrategy for AccessCookieStrategy<R, C>
where
    R: RefreshSessionRepository + 'static,
    C: TokenCache + 'static,
{
    fn name(&self) -> &'static str {
        "access_cookie"
    }

    fn is_primary(&self) -> bool {
        true
    }

    async fn validate(&self, request: &AuthRequest) -> Result<Principal, TokenError> {
        let token = request
            .cookie(&self.cookie_name)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::Missing)?;
        validate_access_token(self.tokens.as_ref(), token, AuthScheme::AccessCookie).await
    }
}
