//! In-memory `UserDirectory` fake with switchable storage failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use wicket::directory::{CredentialRecord, DirectoryError, UserDirectory, UserRecord};

pub struct FakeUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub jwt_version: i64,
    pub permissions: Vec<i64>,
}

#[derive(Default)]
pub struct FakeDirectory {
    users: Mutex<HashMap<i64, FakeUser>>,
    fail: AtomicBool,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: FakeUser) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    /// Simulate the out-of-scope administrative session invalidation.
    pub fn bump_version(&self, id: i64) {
        self.users
            .lock()
            .unwrap()
            .get_mut(&id)
            .expect("user exists")
            .jwt_version += 1;
    }

    /// Make every subsequent lookup fail like a storage outage.
    pub fn fail_lookups(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DirectoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DirectoryError::Storage("fake outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, DirectoryError> {
        self.check_available()?;

        Ok(self.users.lock().unwrap().get(&id).map(|u| UserRecord {
            id: u.id,
            username: u.username.clone(),
            jwt_version: u.jwt_version,
        }))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, DirectoryError> {
        self.check_available()?;

        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .map(|u| CredentialRecord {
                user_id: u.id,
                password_hash: u.password_hash.clone(),
                jwt_version: u.jwt_version,
            }))
    }

    async fn permissions(&self, user_id: i64) -> Result<Vec<i64>, DirectoryError> {
        self.check_available()?;

        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|u| u.permissions.clone())
            .unwrap_or_default())
    }
}
