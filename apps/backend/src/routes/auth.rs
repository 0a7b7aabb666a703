use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::cookies;
use crate::error::AppError;
use crate::services::sessions;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Validate credentials and establish both auth cookies. Responds 204
/// with no body; the tokens travel only in cookies.
async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let pair = sessions::establish(&state, req.username.trim(), &req.password).await?;

    Ok(HttpResponse::NoContent()
        .cookie(cookies::access_cookie(&state.security, pair.access))
        .cookie(cookies::refresh_cookie(&state.security, pair.refresh))
        .finish())
}

/// Clear both auth cookies unconditionally. Idempotent: succeeds whether
/// or not the caller held valid tokens.
async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let [access, refresh] = cookies::removal_cookies(&state.security);

    HttpResponse::NoContent()
        .cookie(access)
        .cookie(refresh)
        .finish()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
    cfg.service(web::resource("/logout").route(web::get().to(logout)));
}
