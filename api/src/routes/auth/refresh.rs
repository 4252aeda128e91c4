use actix_web::{web, HttpRequest, HttpResponse};

use gk_core::errors::{DomainError, TokenError};
use gk_core::repositories::{RefreshSessionRepository, UserRepository};
use gk_core::services::{PasswordHasher, TokenCache};

use crate::dto::TokenResponse;
use crate::handlers::{ApiError, ApiResult};

use super::cookies::refresh_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh cookie sent by the browser and issues a fresh access
/// token. The cookie is single-use and may be rotated at most once per
/// access-token lifetime.
///
/// ## Errors
/// - 400 Bad Request: missing, forged, consumed, throttled or expired cookie
pub async fn refresh<U, R, C, H>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, C, H>>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    R: RefreshSessionRepository + 'static,
    C: TokenCache + 'static,
    H: PasswordHasher + 'static,
{
    let cookie = req
        .cookie(&state.cookie.refresh_cookie_name)
        .ok_or_else(|| ApiError::from_refresh_error(&DomainError::Token(TokenError::Missing)))?;

    let claims = state
        .token_service
        .verify_refresh_cookie(cookie.value())
        .map_err(|e| ApiError::from_refresh_error(&DomainError::Token(e)))?;

    let user = state
        .auth_service
        .resolve_subject_from_refresh_claims(&claims)
        .await
        .map_err(|e| ApiError::from_refresh_error(&e))?;

    let rotated = state
        .token_service
        .rotate_refresh_token(&claims)
        .await
        .map_err(|e| ApiError::from_refresh_error(&e))?;

    let subject = user.subject();
    let access = state
        .token_service
        .create_access_token(&subject, &user.roles)
        .await
        .map_err(|e| ApiError::from_refresh_error(&e))?;

    tracing::info!(subject = %subject, jti = %access.jti, "refresh cookie rotated");

    let max_age = state.token_service.config().cookie_max_age_ms;
    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&state.cookie, rotated, max_age))
        .json(TokenResponse::bearer(access.token, access.expires_in)))
}
