//! Ordered strategy dispatch

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use gk_shared::{CookieConfig, GuardConfig, JwksConfig};

use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ApiKeyRepository, RefreshSessionRepository};
use crate::services::cache::TokenCache;
use crate::services::token::{decode_unverified, TokenService};

use super::api_key::ApiKeyStrategy;
use super::bearer::BearerStrategy;
use super::cookie::AccessCookieStrategy;
use super::jwks::JwksStrategy;
use super::request::AuthRequest;
use super::strategy::AuthStrategy;

/// Outcome of a successful guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Public route; no credential required
    Public,
    Authenticated(Principal),
}

pub struct GuardChain {
    strategies: Vec<Box<dyn AuthStrategy>>,
    public_paths: HashSet<String>,
    access_cookie_name: String,
}

impl GuardChain {
    /// Chain over explicit strategies, tried in the given order
    ///
    /// Fails if no bearer or access-cookie strategy is present.
    pub fn new(strategies: Vec<Box<dyn AuthStrategy>>) -> DomainResult<Self> {
        if !strategies.iter().any(|s| s.is_primary()) {
            return Err(DomainError::internal(
                "guard chain requires the bearer or access-cookie strategy",
            ));
        }
        Ok(Self {
            strategies,
            public_paths: HashSet::new(),
            access_cookie_name: CookieConfig::default().access_cookie_name,
        })
    }

    /// Builds the enabled strategies in fixed order: bearer, access cookie, JWKS, API key
    pub fn from_config<R, C, K>(
        guard: &GuardConfig,
        cookie: &CookieConfig,
        jwks: &JwksConfig,
        tokens: Arc<TokenService<R, C>>,
        api_keys: Arc<K>,
    ) -> DomainResult<Self>
    where
        R: RefreshSessionRepository + 'static,
        C: TokenCache + 'static,
        K: ApiKeyRepository + 'static,
    {
        if !guard.has_primary_scheme() {
            return Err(DomainError::internal(
                "at least one of the bearer or access-cookie guards must be enabled",
            ));
        }

        let mut strategies: Vec<Box<dyn AuthStrategy>> = Vec::new();
        if guard.bearer {
            strategies.push(Box::new(BearerStrategy::new(tokens.clone())));
        }
        if guard.access_cookie {
            strategies.push(Box::new(AccessCookieStrategy::new(
                tokens.clone(),
                cookie.access_cookie_name.clone(),
            )));
        }
        if guard.jwks {
            strategies.push(Box::new(JwksStrategy::new(
                jwks.clone(),
                tokens.cache().clone(),
                tokens.clock().clone(),
            )));
        }
        if guard.api_key {
            strategies.push(Box::new(ApiKeyStrategy::new(
                api_keys,
                tokens.cache().clone(),
                tokens.clock().clone(),
                guard.api_key_header.clone(),
            )));
        }

        let mut chain = Self::new(strategies)?;
        chain.access_cookie_name = cookie.access_cookie_name.clone();
        Ok(chain)
    }

    /// Paths that skip verification entirely
    pub fn with_public_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.contains(path)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Decides whether a request may proceed
    ///
    /// # Returns
    ///
    /// * `Ok(GuardDecision::Public)` - Public route
    /// * `Ok(GuardDecision::Authenticated(_))` - First accepting strategy's principal
    /// * `Err(DomainError::Unauthorized)` - Every strategy rejected
    pub async fn authorize(&self, request: &AuthRequest) -> DomainResult<GuardDecision> {
        if self.is_public(request.path()) {
            self.log_public_access(request);
            return Ok(GuardDecision::Public);
        }

        for strategy in &self.strategies {
            match strategy.validate(request).await {
                Ok(principal) => {
                    debug!(
                        strategy = strategy.name(),
                        subject = %principal.subject,
                        path = %request.path(),
                        "request authenticated"
                    );
                    return Ok(GuardDecision::Authenticated(principal));
                }
                Err(outcome) => {
                    debug!(
                        strategy = strategy.name(),
                        outcome = outcome.as_str(),
                        path = %request.path(),
                        "strategy rejected request"
                    );
                }
            }
        }

        warn!(path = %request.path(), "all guard strategies rejected request");
        Err(DomainError::Unauthorized)
    }

    fn log_public_access(&self, request: &AuthRequest) {
        let token = request
            .bearer_token()
            .or_else(|| request.cookie(&self.access_cookie_name));

        match token.and_then(decode_unverified) {
            Some(claims) => debug!(
                path = %request.path(),
                subject = %claims.sub,
                jti = %claims.jti,
                "public route with unverified credential"
            ),
            None => debug!(path = %request.path(), "public route"),
        }
    }
}
