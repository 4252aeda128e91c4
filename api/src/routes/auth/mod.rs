//! Authentication route handlers
//!
//! - `POST /login` issues an access token and a refresh cookie
//! - `POST /refresh` rotates the refresh cookie and issues a new access token
//! - `POST /logout` revokes the caller's session (guarded)
//! - `GET /whoami` echoes the authenticated principal (guarded)

pub mod cookies;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod whoami;

use std::sync::Arc;

use gk_core::repositories::{RefreshSessionRepository, UserRepository};
use gk_core::services::{AuthenticationService, PasswordHasher, TokenCache, TokenService};
use gk_shared::CookieConfig;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use whoami::whoami;

/// Services shared by the auth handlers
pub struct AppState<U, R, C, H>
where
    U: UserRepository,
    R: RefreshSessionRepository,
    C: TokenCache,
    H: PasswordHasher + 'static,
{
    pub auth_service: Arc<AuthenticationService<U, R, H>>,
    pub token_service: Arc<TokenService<R, C>>,
    pub cookie: CookieConfig,
}

impl<U, R, C, H> AppState<U, R, C, H>
where
    U: UserRepository,
    R: RefreshSessionRepository,
    C: TokenCache,
    H: PasswordHasher + 'static,
{
    pub fn new(
        auth_service: Arc<AuthenticationService<U, R, H>>,
        token_service: Arc<TokenService<R, C>>,
        cookie: CookieConfig,
    ) -> Self {
        Self {
            auth_service,
            token_service,
            cookie,
        }
    }
}
