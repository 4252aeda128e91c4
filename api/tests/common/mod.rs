//! Shared fixtures for the HTTP tests: in-memory storage and a manual clock

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;

use gk_api::app::public_paths;
use gk_api::routes::auth::AppState;
use gk_core::domain::entities::User;
use gk_core::repositories::{
    InMemoryApiKeyRepository, InMemoryRefreshSessionRepository, InMemoryUserRepository,
    UserRepository,
};
use gk_core::services::{
    AuthenticationService, BcryptPasswordHasher, Clock, GuardChain, InMemoryTokenCache,
    ManualClock, PasswordHasher, TokenService, TokenServiceConfig,
};
use gk_shared::{CookieConfig, GuardConfig, JwksConfig, JwtConfig};

pub type TestState = AppState<
    InMemoryUserRepository,
    InMemoryRefreshSessionRepository,
    InMemoryTokenCache,
    BcryptPasswordHasher,
>;

/// 2023-11-14T22:13:20Z
pub const T0: i64 = 1_700_000_000_000;
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "wonderland";

pub struct TestContext {
    pub clock: Arc<ManualClock>,
    pub cache: Arc<InMemoryTokenCache>,
    pub sessions: Arc<InMemoryRefreshSessionRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub api_keys: Arc<InMemoryApiKeyRepository>,
    pub tokens: Arc<TokenService<InMemoryRefreshSessionRepository, InMemoryTokenCache>>,
    pub config: TokenServiceConfig,
    pub user: User,
    state: web::Data<TestState>,
    guard: Arc<GuardChain>,
}

impl TestContext {
    pub async fn new() -> Self {
        let clock = Arc::new(ManualClock::new(T0));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let cache = Arc::new(InMemoryTokenCache::new(dyn_clock.clone()));
        let sessions = Arc::new(InMemoryRefreshSessionRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let api_keys = Arc::new(InMemoryApiKeyRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::new(4));

        let user = users
            .create(User::new(
                USERNAME,
                hasher.hash(PASSWORD).unwrap(),
                vec!["admin".to_string()],
            ))
            .await
            .unwrap();

        let config = TokenServiceConfig::from(&JwtConfig::new("http-access-secret", "http-refresh-secret"));
        let tokens = Arc::new(
            TokenService::new(sessions.clone(), cache.clone(), dyn_clock, config.clone()).unwrap(),
        );
        let auth = Arc::new(AuthenticationService::new(
            users.clone(),
            sessions.clone(),
            hasher,
        ));

        let guard_config = GuardConfig {
            api_key: true,
            ..GuardConfig::default()
        };
        let guard = Arc::new(
            GuardChain::from_config(
                &guard_config,
                &CookieConfig::default(),
                &JwksConfig::default(),
                tokens.clone(),
                api_keys.clone(),
            )
            .unwrap()
            .with_public_paths(public_paths()),
        );

        let state = web::Data::new(AppState::new(auth, tokens.clone(), CookieConfig::default()));

        Self {
            clock,
            cache,
            sessions,
            users,
            api_keys,
            tokens,
            config,
            user,
            state,
            guard,
        }
    }

    pub fn state(&self) -> web::Data<TestState> {
        self.state.clone()
    }

    pub fn guard(&self) -> Arc<GuardChain> {
        self.guard.clone()
    }

    pub fn access_ttl(&self) -> i64 {
        self.config.access_token_ttl_ms
    }
}

pub fn login_body(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": password })
}

/// The `refresh_token` cookie set on a response, if any
pub fn refresh_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.into_owned())
}

/// Log in as the fixture user; evaluates to `(access_token, refresh_cookie)`
macro_rules! login {
    ($app:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json($crate::common::login_body($crate::common::USERNAME, $crate::common::PASSWORD))
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let cookie = $crate::common::refresh_cookie(&resp).expect("refresh cookie set");
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        let token = body["access_token"].as_str().expect("access token").to_string();
        (token, cookie)
    }};
}
