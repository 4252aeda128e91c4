//! `X-API-Key: <id>.<secret>` for machine clients

use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use crate::domain::value_objects::{AuthScheme, Principal};
use crate::errors::TokenError;
use crate::repositories::ApiKeyRepository;
use crate::services::cache::{check_subject_liveness, TokenCache};
use crate::services::clock::Clock;

use super::request::AuthRequest;
use super::strategy::AuthStrategy;

/// Looks the key up by id and compares the secret hash in constant time
///
/// An inactive key counts as a dead token id; the owning subject must
/// still be live.
pub struct ApiKeyStrategy<K: ApiKeyRepository, C: TokenCache> {
    keys: Arc<K>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
    header_name: String,
}

impl<K: ApiKeyRepository, C: TokenCache> ApiKeyStrategy<K, C> {
    pub fn new(keys: Arc<K>, cache: Arc<C>, clock: Arc<dyn Clock>, header_name: impl Into<String>) -> Self {
        Self {
            keys,
            cache,
            clock,
            header_name: header_name.into(),
        }
    }
}

#[async_trait]
impl<K, C> AuthStrategy for ApiKeyStrategy<K, C>
where
    K: ApiKeyRepository + 'static,
    C: TokenCache + 'static,
{
    fn name(&self) -> &'static str {
        "api_key"
    }

    async fn validate(&self, request: &AuthRequest) -> Result<Principal, TokenError> {
        let presented = request
            .header(&self.header_name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(TokenError::Missing)?;

        let (id, secret) = presented
            .split_once('.')
            .filter(|(id, secret)| !id.is_empty() && !secret.is_empty())
            .ok_or(TokenError::InvalidSignature)?;

        let key = match self.keys.find_by_id(id).await {
            Ok(Some(key)) => key,
            Ok(None) => return Err(TokenError::InvalidSignature),
            Err(e) => {
                error!(error = %e, "API key lookup failed");
                return Err(TokenError::InvalidSignature);
            }
        };

        if !key.matches_secret(secret) {
            return Err(TokenError::InvalidSignature);
        }
        if key.is_expired_at(self.clock.now_ms()) {
            return Err(TokenError::Expired);
        }
        if !key.active {
            return Err(TokenError::JtiNotLive);
        }

        check_subject_liveness(self.cache.as_ref(), &key.subject).await?;

        Ok(Principal {
            subject: key.subject,
            roles: key.roles,
            scheme: AuthScheme::ApiKey,
            jti: None,
        })
    }
}
