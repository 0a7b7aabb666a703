//! Auth cookie construction. Both cookies are httpOnly and SameSite=Strict;
//! `Secure` is added only under a production configuration. Removal cookies
//! carry the same attributes so browsers actually drop them.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use crate::state::security_config::SecurityConfig;

pub fn access_cookie(security: &SecurityConfig, token: String) -> Cookie<'static> {
    session_cookie(
        security.access_cookie.name.clone(),
        token,
        security.access_cookie.max_age_secs,
        security.secure_cookies,
    )
}

pub fn refresh_cookie(security: &SecurityConfig, token: String) -> Cookie<'static> {
    session_cookie(
        security.refresh_cookie.name.clone(),
        token,
        security.refresh_cookie.max_age_secs,
        security.secure_cookies,
    )
}

/// Expired variants of both auth cookies, used on logout and on the guard
/// rejection branches that clear state.
pub fn removal_cookies(security: &SecurityConfig) -> [Cookie<'static>; 2] {
    [
        removal_cookie(security.access_cookie.name.clone(), security.secure_cookies),
        removal_cookie(security.refresh_cookie.name.clone(), security.secure_cookies),
    ]
}

fn session_cookie(name: String, value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

fn removal_cookie(name: String, secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), 0, secure);
    cookie.make_removal();
    cookie
}
