//! Token and cookie configuration, built once at startup and injected
//! everywhere it is needed. Never ambient global state.

use crate::auth::codec::JwtCodec;
use crate::error::AppError;

/// Secret and TTL for one token kind.
#[derive(Debug, Clone)]
pub struct TokenParams {
    pub secret: Vec<u8>,
    pub ttl_secs: i64,
}

impl TokenParams {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }
}

/// Name and max-age for one auth cookie.
#[derive(Debug, Clone)]
pub struct CookieParams {
    pub name: String,
    pub max_age_secs: i64,
}

impl CookieParams {
    pub fn new(name: impl Into<String>, max_age_secs: i64) -> Self {
        Self {
            name: name.into(),
            max_age_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub access: TokenParams,
    pub refresh: TokenParams,
    pub access_cookie: CookieParams,
    pub refresh_cookie: CookieParams,
    /// Mark cookies `Secure` (production deployments only).
    pub secure_cookies: bool,
}

impl SecurityConfig {
    /// Access and refresh secrets must differ so one token kind cannot be
    /// replayed as the other.
    pub fn new(
        access: TokenParams,
        refresh: TokenParams,
        access_cookie: CookieParams,
        refresh_cookie: CookieParams,
        secure_cookies: bool,
    ) -> Result<Self, AppError> {
        if access.secret == refresh.secret {
            return Err(AppError::config(
                "access and refresh token secrets must be distinct".to_string(),
            ));
        }

        Ok(Self {
            access,
            refresh,
            access_cookie,
            refresh_cookie,
            secure_cookies,
        })
    }

    /// Read the full configuration surface from the environment. Every
    /// variable is required; absence is a fatal startup error.
    pub fn from_env() -> Result<Self, AppError> {
        let access = TokenParams::new(
            required_var("JWT_ACCESS_SECRET")?,
            required_secs("JWT_ACCESS_TTL_SECS")?,
        );
        let refresh = TokenParams::new(
            required_var("JWT_REFRESH_SECRET")?,
            required_secs("JWT_REFRESH_TTL_SECS")?,
        );
        let access_cookie = CookieParams::new(
            required_var("JWT_ACCESS_COOKIE_NAME")?,
            required_secs("JWT_ACCESS_COOKIE_MAX_AGE_SECS")?,
        );
        let refresh_cookie = CookieParams::new(
            required_var("JWT_REFRESH_COOKIE_NAME")?,
            required_secs("JWT_REFRESH_COOKIE_MAX_AGE_SECS")?,
        );
        let secure_cookies = required_var("APP_ENV")? == "production";

        Self::new(access, refresh, access_cookie, refresh_cookie, secure_cookies)
    }

    pub fn access_codec(&self) -> JwtCodec {
        JwtCodec::new(self.access.secret.clone(), self.access.ttl_secs)
    }

    pub fn refresh_codec(&self) -> JwtCodec {
        JwtCodec::new(self.refresh.secret.clone(), self.refresh.ttl_secs)
    }

    /// Short-TTL config with distinct throwaway secrets, for tests.
    pub fn for_tests() -> Self {
        Self::new(
            TokenParams::new("access_secret_for_tests_only", 900),
            TokenParams::new("refresh_secret_for_tests_only", 7 * 24 * 3600),
            CookieParams::new("access_token", 900),
            CookieParams::new("refresh_token", 7 * 24 * 3600),
            false,
        )
        .expect("test secrets are distinct")
    }
}

fn required_var(key: &str) -> Result<String, AppError> {
    std::env::var(key).map_err(|_| AppError::config(format!("{key} must be set")))
}

fn required_secs(key: &str) -> Result<i64, AppError> {
    let raw = required_var(key)?;
    let secs: i64 = raw
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be an integer, got {raw:?}")))?;
    if secs <= 0 {
        return Err(AppError::config(format!(
            "{key} must be positive, got {secs}"
        )));
    }
    Ok(secs)
}
