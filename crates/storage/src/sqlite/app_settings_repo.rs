use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{AppSettingsRepository, StorageError};
use quiz_core::model::AppSettings;

use super::SqliteRepository;

#[async_trait]
impl AppSettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT dark_theme
            FROM app_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let dark_theme: bool = row
            .try_get("dark_theme")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(AppSettings::from_persisted(dark_theme)))
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_settings (id, dark_theme)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                dark_theme = excluded.dark_theme
            ",
        )
        .bind(1_i64)
        .bind(settings.dark_theme())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
