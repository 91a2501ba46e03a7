//! Settings persisted as one JSON document in `settings_kv`.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use voicestream_core::{RepositoryError, Settings, SettingsRepository};

use super::row_mappers::storage_error;

const SETTINGS_KEY: &str = "app_settings";

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn serialization_error(e: serde_json::Error) -> RepositoryError {
    RepositoryError::Serialization(e.to_string())
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        let stored: Option<String> = sqlx::query("SELECT value FROM settings_kv WHERE key = ?")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .map(|row| row.try_get("value"))
            .transpose()
            .map_err(storage_error)?;

        stored.map_or_else(
            || Ok(Settings::with_defaults()),
            |json| serde_json::from_str(&json).map_err(serialization_error),
        )
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(settings).map_err(serialization_error)?;

        sqlx::query(
            "INSERT INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(SETTINGS_KEY)
        .bind(json)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}
