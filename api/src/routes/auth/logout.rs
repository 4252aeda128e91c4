use actix_web::{web, HttpResponse};

use gk_core::repositories::{RefreshSessionRepository, UserRepository};
use gk_core::services::{PasswordHasher, TokenCache};

use crate::dto::LogoutResponse;
use crate::middleware::AuthContext;

use super::cookies::removal_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the caller's refresh session and the presenting access token.
/// Always answers 200 and clears the refresh cookie; revocation failures
/// (for example a second logout) are only logged.
pub async fn logout<U, R, C, H>(
    state: web::Data<AppState<U, R, C, H>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshSessionRepository + 'static,
    C: TokenCache + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(error) = state.token_service.revoke_refresh_token(&auth.subject).await {
        tracing::warn!(subject = %auth.subject, error = %error, "refresh session revocation failed");
    }

    if let Some(jti) = auth.jti.as_deref() {
        if let Err(error) = state.token_service.revoke_access_token(jti).await {
            tracing::warn!(subject = %auth.subject, jti = %jti, error = %error, "access token revocation failed");
        }
    }

    tracing::info!(subject = %auth.subject, scheme = %auth.scheme, "logged out");

    HttpResponse::Ok()
        .cookie(removal_cookie(&state.cookie))
        .json(LogoutResponse {
            message: String::from("Logged out successfully"),
        })
}
