//! RS256 tokens from a federated issuer, verified against its JWKS

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use gk_shared::JwksConfig;

use crate::domain::entities::token::AccessClaims;
use crate::domain::value_objects::{AuthScheme, Principal};
use crate::errors::TokenError;
use crate::services::cache::{check_liveness, TokenCache};
use crate::services::clock::Clock;

use super::request::AuthRequest;
use super::strategy::AuthStrategy;

const KNOWN_KIDS_KEY: &str = "jwks";

/// JSON Web Key Set
#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// RSA public key entry
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    pub alg: Option<String>,
    pub n: String,
    pub e: String,
}

/// Validates federated RS256 bearer tokens
///
/// Keys are cached per `kid`. Once a key set has been fetched, tokens
/// naming a `kid` outside it are rejected without refetching.
pub struct JwksStrategy<C: TokenCache> {
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
    config: JwksConfig,
    http_client: reqwest::Client,
    /// kid -> decoding key
    key_cache: Cache<String, Arc<DecodingKey>>,
    /// "jwks" -> kids present in the last fetched set
    known_kids: Cache<String, Arc<Vec<String>>>,
}

impl<C: TokenCache> JwksStrategy<C> {
    pub fn new(config: JwksConfig, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(2)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Self {
            cache,
            clock,
            config,
            http_client,
            key_cache: Cache::builder().time_to_live(ttl).max_capacity(100).build(),
            known_kids: Cache::builder().time_to_live(ttl).max_capacity(1).build(),
        }
    }

    /// Drop cached keys so the next token triggers a fetch
    pub fn invalidate_keys(&self) {
        self.key_cache.invalidate_all();
        self.known_kids.invalidate_all();
    }

    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "federated token header unreadable");
            TokenError::InvalidSignature
        })?;

        if header.alg != Algorithm::RS256 {
            return Err(TokenError::InvalidSignature);
        }
        let kid = header.kid.ok_or(TokenError::InvalidSignature)?;
        let key = self.get_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;
        validation.validate_aud = false;

        let claims = decode::<AccessClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "federated token rejected");
                TokenError::InvalidSignature
            })?;

        if claims.is_expired_at(self.clock.now_secs()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    async fn get_key(&self, kid: &str) -> Result<Arc<DecodingKey>, TokenError> {
        if let Some(key) = self.key_cache.get(kid).await {
            return Ok(key);
        }

        if let Some(known) = self.known_kids.get(KNOWN_KIDS_KEY).await {
            if !known.iter().any(|k| k == kid) {
                debug!(kid = %kid, "unknown key id");
                return Err(TokenError::InvalidSignature);
            }
        }

        let jwks = self.fetch_jwks().await?;

        let kids: Vec<String> = jwks.keys.iter().map(|k| k.kid.clone()).collect();
        self.known_kids
            .insert(KNOWN_KIDS_KEY.to_string(), Arc::new(kids))
            .await;

        for jwk in &jwks.keys {
            match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => self.key_cache.insert(jwk.kid.clone(), Arc::new(key)).await,
                Err(e) => error!(kid = %jwk.kid, error = %e, "unusable key in JWKS"),
            }
        }

        self.key_cache.get(kid).await.ok_or_else(|| {
            debug!(kid = %kid, "key id not in JWKS");
            TokenError::InvalidSignature
        })
    }

    async fn fetch_jwks(&self) -> Result<Jwks, TokenError> {
        debug!(url = %self.config.url, "fetching JWKS");

        let response = self
            .http_client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "failed to fetch JWKS");
                TokenError::InvalidSignature
            })?;

        if !response.status().is_success() {
            error!(status = %response.status(), "JWKS fetch returned error status");
            return Err(TokenError::InvalidSignature);
        }

        response.json::<Jwks>().await.map_err(|e| {
            error!(error = %e, "failed to parse JWKS");
            TokenError::InvalidSignature
        })
    }
}

#[async_trait]
impl<C: TokenCache + 'static> AuthStrategy for JwksStrategy<C> {
    fn name(&self) -> &'static str {
        "jwks"
    }

    async fn validate(&self, request: &AuthRequest) -> Result<Principal, TokenError> {
        let token = request.bearer_token().ok_or(TokenError::Missing)?;
        let claims = self.verify(token).await?;
        check_liveness(self.cache.as_ref(), &claims.jti, &claims.sub).await?;

        Ok(Principal {
            subject: claims.sub,
            roles: claims.roles,
            scheme: AuthScheme::Jwks,
            jti: Some(claims.jti),
        })
    }
}
