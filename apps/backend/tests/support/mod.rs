// Shared helpers for integration tests. Each test binary uses a subset.
#![allow(dead_code)]

pub mod fake_directory;
pub mod tokens;

use std::sync::Arc;

use wicket::hash::{Argon2HashService, HashService};
use wicket::state::app_state::AppState;
use wicket::state::security_config::SecurityConfig;

use fake_directory::{FakeDirectory, FakeUser};

/// AppState over a fake directory with the throwaway test security config.
pub fn test_state(directory: Arc<FakeDirectory>) -> AppState {
    AppState::new(
        directory,
        Arc::new(Argon2HashService),
        SecurityConfig::for_tests(),
    )
}

/// Insert a user with a real argon2 hash of `password` and version 1.
pub fn seed_user(
    directory: &FakeDirectory,
    id: i64,
    username: &str,
    password: &str,
    permissions: Vec<i64>,
) {
    let password_hash = Argon2HashService
        .hash(password)
        .expect("test password hashes");

    directory.insert(FakeUser {
        id,
        username: username.to_string(),
        password_hash,
        jwt_version: 1,
        permissions,
    });
}
