//! Two-key liveness check shared by every guard strategy.

use tracing::error;

use crate::domain::entities::token::{jti_key, subject_key};
use crate::errors::TokenError;

use super::traits::TokenCache;

/// Both `JWT_JTI:<jti>` and `USER_SUBJECT:<subject>` must be present
///
/// Cache failures are treated as "not live".
pub async fn check_liveness<C: TokenCache + ?Sized>(
    cache: &C,
    jti: &str,
    subject: &str,
) -> Result<(), TokenError> {
    match cache.exists(&jti_key(jti)).await {
        Ok(true) => {}
        Ok(false) => return Err(TokenError::JtiNotLive),
        Err(e) => {
            error!(error = %e, "liveness cache lookup failed");
            return Err(TokenError::JtiNotLive);
        }
    }
    check_subject_liveness(cache, subject).await
}

/// Only the subject kill-switch, for credentials without a token id
pub async fn check_subject_liveness<C: TokenCache + ?Sized>(
    cache: &C,
    subject: &str,
) -> Result<(), TokenError> {
    match cache.exists(&subject_key(subject)).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(TokenError::SubjectNotLive),
        Err(e) => {
            error!(error = %e, "liveness cache lookup failed");
            Err(TokenError::SubjectNotLive)
        }
    }
}
