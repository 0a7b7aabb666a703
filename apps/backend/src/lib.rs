#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod directory;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod hash;
pub mod infra;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for public API
pub use auth::claims::{Claims, Identity};
pub use auth::codec::{JwtCodec, TokenError};
pub use auth::session::{GuardError, SessionOutcome};
pub use error::AppError;
pub use infra::db::connect_db;
pub use middleware::permission_gate::RequirePermission;
pub use middleware::session_guard::SessionGuard;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
mod test_bootstrap;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::init();
}
