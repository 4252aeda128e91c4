//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::RefreshSession;
use crate::domain::entities::token::{
    jti_key, subject_key, AccessClaims, IssuedAccessToken, RefreshClaims, LIVE_MARKER,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RefreshSessionRepository;
use crate::services::cache::TokenCache;
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Service for access tokens and refresh cookies
pub struct TokenService<R: RefreshSessionRepository, C: TokenCache> {
    sessions: Arc<R>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl<R: RefreshSessionRepository, C: TokenCache> TokenService<R, C> {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// `Err(DomainError::Internal)` if the secrets are empty or identical
    pub fn new(
        sessions: Arc<R>,
        cache: Arc<C>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> DomainResult<Self> {
        if config.access_token_secret.is_empty() || config.refresh_cookie_secret.is_empty() {
            return Err(DomainError::internal("token secrets must not be empty"));
        }
        if config.access_token_secret == config.refresh_cookie_secret {
            return Err(DomainError::internal(
                "access token and refresh cookie secrets must differ",
            ));
        }

        // Expiry is checked against the injected clock, not inside jsonwebtoken
        let mut access_validation = Validation::new(Algorithm::HS256);
        access_validation.set_issuer(&[config.issuer.as_str()]);
        access_validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        access_validation.validate_exp = false;
        access_validation.validate_aud = false;

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.set_required_spec_claims(&["exp"]);
        refresh_validation.validate_exp = false;
        refresh_validation.validate_aud = false;

        Ok(Self {
            sessions,
            cache,
            clock,
            access_encoding_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_cookie_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_cookie_secret.as_bytes()),
            access_validation,
            refresh_validation,
            config,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Liveness cache shared with the guard strategies
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    /// Issues an access token and marks its jti live for the token lifetime
    pub async fn create_access_token(
        &self,
        subject: &str,
        roles: &[String],
    ) -> DomainResult<IssuedAccessToken> {
        let iat = self.clock.now_secs();
        let claims = AccessClaims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.config.access_token_ttl_secs(),
            iss: self.config.issuer.clone(),
        };

        self.cache
            .set(
                &jti_key(&claims.jti),
                LIVE_MARKER,
                Some(self.config.access_token_ttl_ms),
            )
            .await?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding_key)
            .map_err(|e| DomainError::internal(format!("failed to sign access token: {}", e)))?;

        debug!(subject = %subject, jti = %claims.jti, "access token issued");

        Ok(IssuedAccessToken {
            token,
            jti: claims.jti,
            expires_in: self.config.access_token_ttl_secs(),
        })
    }

    /// Starts a refresh session for `subject` and returns the signed cookie value
    pub async fn create_refresh_cookie(&self, subject: &str) -> DomainResult<String> {
        let now = self.clock.now_ms();
        let claims = self.new_refresh_claims(now);
        let hash = claims.hash()?;

        let session = self
            .sessions
            .save(RefreshSession::new(subject, claims.jti.clone(), hash, now))
            .await?;

        self.mark_subject_live(subject).await?;

        info!(subject = %subject, session = %session.uuid, "refresh session created");
        self.sign_refresh_claims(&claims)
    }

    /// Exchanges a valid refresh cookie for a new one
    ///
    /// The old cookie is single-use. Rejected with `Expired` once the session
    /// outlived the cookie max age, and with `Throttled` inside the access
    /// token lifetime since the last rotation.
    pub async fn rotate_refresh_token(&self, old: &RefreshClaims) -> DomainResult<String> {
        let old_hash = old.hash()?;
        let session = self
            .sessions
            .find_by_hash(&old_hash)
            .await?
            .ok_or_else(|| DomainError::not_found("refresh session"))?;

        let now = self.clock.now_ms();
        if session.is_expired(now, self.config.cookie_max_age_ms) {
            warn!(subject = %session.subject, session = %session.uuid, "refresh rejected: cookie has expired");
            return Err(DomainError::Expired);
        }
        if session.is_throttled(now, self.config.access_token_ttl_ms) {
            warn!(subject = %session.subject, session = %session.uuid, "refresh rejected: refreshing too soon");
            return Err(DomainError::Throttled);
        }

        let claims = self.new_refresh_claims(now);
        let rotated = session.rotated(claims.jti.clone(), claims.hash()?, now);

        if !self.sessions.rotate(&rotated, session.version).await? {
            // Another request consumed this cookie first
            let still_present = self.sessions.find_by_hash(&old_hash).await?.is_some();
            warn!(
                subject = %session.subject,
                session = %session.uuid,
                still_present,
                "refresh rejected: concurrent rotation"
            );
            return Err(DomainError::not_found("refresh session"));
        }

        self.mark_subject_live(&session.subject).await?;

        info!(subject = %session.subject, session = %session.uuid, "refresh session rotated");
        self.sign_refresh_claims(&claims)
    }

    /// Ends every refresh session of `subject` and clears its liveness key
    ///
    /// Refresh cookie jtis never enter the cache, so only the subject key is
    /// touched. It is cleared even when no session exists, in which case
    /// `Internal` is returned.
    pub async fn revoke_refresh_token(&self, subject: &str) -> DomainResult<()> {
        self.cache.del(&subject_key(subject)).await?;

        let removed = self.sessions.remove_by_subject(subject).await?;
        if removed == 0 {
            return Err(DomainError::internal(format!(
                "no refresh session for subject {}",
                subject
            )));
        }

        info!(subject = %subject, removed, "refresh sessions revoked");
        Ok(())
    }

    /// Revokes one access token
    pub async fn revoke_access_token(&self, jti: &str) -> DomainResult<()> {
        self.cache.del(&jti_key(jti)).await?;
        debug!(jti = %jti, "access token revoked");
        Ok(())
    }

    /// Verifies signature, issuer and expiry of an access token
    ///
    /// Liveness is not checked here; see the guard strategies.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let claims = decode::<AccessClaims>(token, &self.access_decoding_key, &self.access_validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)?;

        if claims.is_expired_at(self.clock.now_secs()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Verifies signature and expiry of a refresh cookie value
    pub fn verify_refresh_cookie(&self, value: &str) -> Result<RefreshClaims, TokenError> {
        let claims = decode::<RefreshClaims>(value, &self.refresh_decoding_key, &self.refresh_validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)?;

        if claims.is_expired_at(self.clock.now_secs()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Reads access token claims without any verification (logging only)
    pub fn decode_unverified(&self, token: &str) -> Option<AccessClaims> {
        decode_unverified(token)
    }

    /// Hash correlating refresh claims with their session
    pub fn claims_hash(&self, claims: &RefreshClaims) -> DomainResult<String> {
        claims.hash()
    }

    fn new_refresh_claims(&self, now_ms: i64) -> RefreshClaims {
        let iat = now_ms.div_euclid(1000);
        RefreshClaims {
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.config.refresh_token_ttl_secs(),
        }
    }

    fn sign_refresh_claims(&self, claims: &RefreshClaims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.refresh_encoding_key)
            .map_err(|e| DomainError::internal(format!("failed to sign refresh cookie: {}", e)))
    }

    async fn mark_subject_live(&self, subject: &str) -> DomainResult<()> {
        self.cache
            .set(
                &subject_key(subject),
                LIVE_MARKER,
                Some(self.config.cookie_max_age_ms),
            )
            .await
    }
}

/// Decodes access token claims without checking signature or expiry
pub fn decode_unverified(token: &str) -> Option<AccessClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_aud = false;

    decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims)
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> TokenError {
    debug!(error = %e, "token rejected");
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::InvalidSignature,
    }
}
