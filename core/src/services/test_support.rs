//! Shared fixtures for service tests

use std::sync::Arc;

use gk_shared::JwtConfig;

use crate::repositories::InMemoryRefreshSessionRepository;
use crate::services::cache::InMemoryTokenCache;
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(crate) type TestTokenService = TokenService<InMemoryRefreshSessionRepository, InMemoryTokenCache>;

/// 2023-11-14T22:13:20Z
pub(crate) const T0: i64 = 1_700_000_000_000;

pub(crate) fn jwt_config() -> JwtConfig {
    JwtConfig::new("test-access-secret", "test-refresh-secret")
}

pub(crate) struct TestContext {
    pub clock: Arc<ManualClock>,
    pub cache: Arc<InMemoryTokenCache>,
    pub sessions: Arc<InMemoryRefreshSessionRepository>,
    pub tokens: Arc<TestTokenService>,
    pub config: TokenServiceConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_clock(ManualClock::new(T0))
    }

    pub fn with_clock(clock: ManualClock) -> Self {
        let clock = Arc::new(clock);
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let cache = Arc::new(InMemoryTokenCache::new(dyn_clock.clone()));
        let sessions = Arc::new(InMemoryRefreshSessionRepository::new());
        let config = TokenServiceConfig::from(&jwt_config());
        let tokens = Arc::new(
            TokenService::new(sessions.clone(), cache.clone(), dyn_clock, config.clone())
                .expect("valid token service config"),
        );

        Self {
            clock,
            cache,
            sessions,
            tokens,
            config,
        }
    }

    pub fn access_ttl(&self) -> i64 {
        self.config.access_token_ttl_ms
    }

    pub fn max_age(&self) -> i64 {
        self.config.cookie_max_age_ms
    }
}
