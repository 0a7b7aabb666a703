use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::hash::HashService;

use super::security_config::SecurityConfig;

/// Application state containing shared resources. The directory and hash
/// service are injected behind traits so the guard and login flow can be
/// exercised against fakes.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectory>,
    pub hash: Arc<dyn HashService>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hash: Arc<dyn HashService>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            directory,
            hash,
            security,
        }
    }
}
