use actix_web::{web, HttpResponse};
use validator::Validate;

use gk_core::repositories::{RefreshSessionRepository, UserRepository};
use gk_core::services::{PasswordHasher, TokenCache};

use crate::dto::{LoginRequest, TokenResponse};
use crate::handlers::{ApiError, ApiResult};

use super::cookies::refresh_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access_token": "eyJ...", "token_type": "Bearer", "expires_in": 900 }
/// ```
/// plus `Set-Cookie: refresh_token=...; HttpOnly; SameSite=Strict`.
///
/// ## Errors
/// - 400 Bad Request: missing username or password
/// - 401 Unauthorized: any other failure
pub async fn login<U, R, C, H>(
    state: web::Data<AppState<U, R, C, H>>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse>
where
    U: UserRepository + 'static,
    R: RefreshSessionRepository + 'static,
    C: TokenCache + 'static,
    H: PasswordHasher + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        tracing::info!(errors = %errors, "login rejected: invalid request");
        return Err(ApiError::BadRequest);
    }

    let credentials = request.into_credentials();
    let user = state
        .auth_service
        .authenticate(&credentials)
        .await
        .map_err(|e| ApiError::from_login_error(&e))?;

    let subject = user.subject();
    let access = state
        .token_service
        .create_access_token(&subject, &user.roles)
        .await
        .map_err(|e| ApiError::from_login_error(&e))?;
    let cookie_value = state
        .token_service
        .create_refresh_cookie(&subject)
        .await
        .map_err(|e| ApiError::from_login_error(&e))?;

    tracing::info!(subject = %subject, jti = %access.jti, "login succeeded");

    let max_age = state.token_service.config().cookie_max_age_ms;
    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&state.cookie, cookie_value, max_age))
        .json(TokenResponse::bearer(access.token, access.expires_in)))
}
