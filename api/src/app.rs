//! Application factory

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use gk_core::repositories::{RefreshSessionRepository, UserRepository};
use gk_core::services::{GuardChain, PasswordHasher, TokenCache};
use gk_shared::ErrorResponse;

use crate::handlers::ApiError;
use crate::middleware::GuardAuth;
use crate::routes::auth::{login, logout, refresh, whoami, AppState};
use crate::routes::health::health_check;

pub const AUTH_SCOPE: &str = "/api/v1/auth";

/// Routes under the auth scope the guard lets through without credentials
pub fn public_paths() -> Vec<String> {
    vec![
        format!("{}/login", AUTH_SCOPE),
        format!("{}/refresh", AUTH_SCOPE),
        String::from("/health"),
    ]
}

/// Create and configure the application with all dependencies
pub fn create_app<U, R, C, H>(
    app_state: web::Data<AppState<U, R, C, H>>,
    guard: Arc<GuardChain>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: RefreshSessionRepository + 'static,
    C: TokenCache + 'static,
    H: PasswordHasher + 'static,
{
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        tracing::info!(error = %err, "malformed JSON body");
        ApiError::BadRequest.into()
    });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(AUTH_SCOPE)
                .wrap(GuardAuth::new(guard))
                .route("/login", web::post().to(login::<U, R, C, H>))
                .route("/refresh", web::post().to(refresh::<U, R, C, H>))
                .route("/logout", web::post().to(logout::<U, R, C, H>))
                .route("/whoami", web::get().to(whoami)),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        gk_shared::error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
