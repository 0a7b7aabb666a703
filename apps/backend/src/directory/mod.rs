//! User directory: the storage collaborator the session guard and login
//! flow read from. Injected as a trait object so both are testable with
//! in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

pub mod sea;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for DirectoryError {
    fn from(e: sea_orm::DbErr) -> Self {
        DirectoryError::Storage(e.to_string())
    }
}

/// User record as seen by the session guard: read-only, keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub jwt_version: i64,
}

/// Credential record looked up at login by username.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    pub user_id: i64,
    pub password_hash: String,
    pub jwt_version: i64,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by id. `Ok(None)` means no such user; `Err` is a
    /// storage failure and is never folded into an auth failure.
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, DirectoryError>;

    /// Fetch the credential record for a login identifier.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, DirectoryError>;

    /// Permission ids granted to a user. Unknown users yield an empty set.
    async fn permissions(&self, user_id: i64) -> Result<Vec<i64>, DirectoryError>;
}
