use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use gk_api::app::{create_app, public_paths};
use gk_api::routes::auth::AppState;
use gk_api::telemetry::init_tracing;
use gk_core::services::{
    AuthenticationService, BcryptPasswordHasher, Clock, GuardChain, SystemClock, TokenService,
    TokenServiceConfig,
};
use gk_infra::Infrastructure;
use gk_shared::AppConfig;

const BCRYPT_COST: u32 = 12;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(environment = ?config.environment, "Starting Gatekeeper");
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT secrets are development defaults; set JWT_ACCESS_SECRET and JWT_REFRESH_SECRET");
    }

    let infra = Infrastructure::connect(&config.database, &config.cache)
        .await
        .context("failed to connect storage backends")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_service = Arc::new(TokenService::new(
        infra.sessions.clone(),
        infra.cache.clone(),
        clock,
        TokenServiceConfig::from(&config.auth.jwt),
    )?);
    let auth_service = Arc::new(AuthenticationService::new(
        infra.users.clone(),
        infra.sessions.clone(),
        Arc::new(BcryptPasswordHasher::new(BCRYPT_COST)),
    ));

    let guard = Arc::new(
        GuardChain::from_config(
            &config.auth.guard,
            &config.auth.cookie,
            &config.auth.jwks,
            token_service.clone(),
            infra.api_keys.clone(),
        )?
        .with_public_paths(public_paths()),
    );
    tracing::info!(strategies = ?guard.strategy_names(), "guard chain ready");

    let state = web::Data::new(AppState::new(
        auth_service,
        token_service,
        config.auth.cookie.clone(),
    ));

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), guard.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    infra.pool.close().await;
    Ok(())
}
