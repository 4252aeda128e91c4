//! Refresh cookie attributes

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use gk_shared::CookieConfig;

/// HTTP-only, same-site strict cookie whose max-age mirrors the absolute session lifetime
pub fn refresh_cookie(config: &CookieConfig, value: String, max_age_ms: i64) -> Cookie<'static> {
    Cookie::build(config.refresh_cookie_name.clone(), value)
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_ms / 1000))
        .finish()
}

/// Expired, empty refresh cookie that makes the client drop its copy
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = refresh_cookie(config, String::new(), 0);
    cookie.make_removal();
    cookie
}
