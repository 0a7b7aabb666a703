//! Login flow: credential validation and token pair issuance.

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::web;

use crate::auth::claims::Identity;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Validate `username`/`password` and mint both tokens.
///
/// Unknown users and wrong passwords produce the same error. Storage
/// failures surface as internal errors, never as bad credentials.
pub async fn establish(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<TokenPair, AppError> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::bad_request(
            "MISSING_CREDENTIALS",
            "Username and password are required".to_string(),
        ));
    }

    let credentials = state
        .directory
        .find_credentials(username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    // Argon2 comparison is CPU-bound; keep it off the async executor.
    let hash = Arc::clone(&state.hash);
    let supplied = password.to_string();
    let stored = credentials.password_hash.clone();
    let matches = web::block(move || hash.verify(&supplied, &stored)).await?;

    if !matches {
        return Err(AppError::invalid_credentials());
    }

    let permissions = state.directory.permissions(credentials.user_id).await?;

    let identity = Identity {
        sub: credentials.user_id,
        ver: credentials.jwt_version,
        per: permissions,
    };

    let now = SystemTime::now();
    let access = state.security.access_codec().sign(&identity, now)?;
    let refresh = state.security.refresh_codec().sign(&identity, now)?;

    Ok(TokenPair { access, refresh })
}
