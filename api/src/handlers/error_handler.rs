//! Maps domain failures to opaque HTTP responses
//!
//! Clients only ever see a generic code; the cause is logged here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use gk_core::errors::DomainError;
use gk_shared::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("bad request")]
    BadRequest,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    /// Login: bad input is a 400, every other failure an opaque 401
    pub fn from_login_error(error: &DomainError) -> Self {
        match error {
            DomainError::BadInput { .. } => {
                tracing::info!(error = %error, "login rejected: bad input");
                ApiError::BadRequest
            }
            DomainError::Internal { .. } => {
                tracing::error!(error = %error, "login failed");
                ApiError::Unauthorized
            }
            _ => {
                tracing::info!(error = %error, "login rejected");
                ApiError::Unauthorized
            }
        }
    }

    /// Refresh: every failure is an opaque 400
    pub fn from_refresh_error(error: &DomainError) -> Self {
        match error {
            DomainError::Internal { .. } => tracing::error!(error = %error, "refresh failed"),
            _ => tracing::info!(error = %error, "refresh rejected"),
        }
        ApiError::BadRequest
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Unauthorized => ErrorResponse::unauthorized(),
            ApiError::BadRequest => ErrorResponse::bad_request(),
            ApiError::Internal => ErrorResponse::internal(),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::errors::TokenError;

    #[test]
    fn test_login_error_mapping() {
        assert!(matches!(
            ApiError::from_login_error(&DomainError::bad_input("missing username")),
            ApiError::BadRequest
        ));
        assert!(matches!(
            ApiError::from_login_error(&DomainError::Unauthorized),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_login_error(&DomainError::internal("cache down")),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn test_refresh_errors_are_opaque_bad_requests() {
        for error in [
            DomainError::Throttled,
            DomainError::Expired,
            DomainError::not_found("refresh session"),
            DomainError::Token(TokenError::InvalidSignature),
        ] {
            let api = ApiError::from_refresh_error(&error);
            assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
