//! `Authorization: Bearer <access token>`

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::value_objects::{AuthScheme, Principal};
use crate::errors::TokenError;
use crate::repositories::RefreshSessionRepository;
use crate::services::cache::{check_liveness, TokenCache};
use crate::services::token::TokenService;

use super::request::AuthRequest;
use super::strategy::AuthStrategy;

pub struct BearerStrategy<R: RefreshSessionRepository, C: TokenCache> {
    tokens: Arc<TokenService<R, C>>,
}

impl<R: RefreshSessionRepository, C: TokenCache> BearerStrategy<R, C> {
    pub fn new(tokens: Arc<TokenService<R, C>>) -> Self {
        Self { tokens }
    }
}

/// Verify an access token and both liveness keys
pub(crate) async fn validate_access_token<R, C>(
    tokens: &TokenService<R, C>,
    token: &str,
    scheme: AuthScheme,
) -> Result<Principal, TokenError>
where
    R: RefreshSessionRepository,
    C: TokenCache,
{
    let claims = tokens.verify_access_token(token)?;
    check_liveness(tokens.cache().as_ref(), &claims.jti, &claims.sub).await?;

    Ok(Principal {
        subject: claims.sub,
        roles: claims.roles,
        scheme,
        jti: Some(claims.jti),
    })
}

#[async_trait]
impl<R, C> AuthStrategy for BearerStrategy<R, C>
where
    R: RefreshSessionRepository + 'static,
    C: TokenCache + 'static,
{
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn is_primary(&self) -> bool {
        true
    }

    async fn validate(&self, request: &AuthRequest) -> Result<Principal, TokenError> {
        let token = request.bearer_token().ok_or(TokenError::Missing)?;
        validate_access_token(self.tokens.as_ref(), token, AuthScheme::Bearer).await
    }
}
