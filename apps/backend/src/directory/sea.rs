//! SeaORM-backed implementation of the user directory.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::directory::{CredentialRecord, DirectoryError, UserDirectory, UserRecord};
use crate::entities::{user_permissions, users};

#[derive(Debug, Clone)]
pub struct SeaUserDirectory {
    db: DatabaseConnection,
}

impl SeaUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SeaUserDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, DirectoryError> {
        let user = users::Entity::find_by_id(id).one(&self.db).await?;

        Ok(user.map(|m| UserRecord {
            id: m.id,
            username: m.username,
            jwt_version: m.jwt_version,
        }))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, DirectoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user.map(|m| CredentialRecord {
            user_id: m.id,
            password_hash: m.password,
            jwt_version: m.jwt_version,
        }))
    }

    async fn permissions(&self, user_id: i64) -> Result<Vec<i64>, DirectoryError> {
        let rows = user_permissions::Entity::find()
            .filter(user_permissions::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|m| m.permission_id).collect())
    }
}
