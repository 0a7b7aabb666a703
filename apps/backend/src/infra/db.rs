use sea_orm::{Database, DatabaseConnection};

use crate::error::AppError;

pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    Database::connect(url)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))
}
