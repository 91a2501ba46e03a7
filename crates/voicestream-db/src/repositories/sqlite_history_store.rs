//! `SQLite` implementation of the `HistoryStore` trait.
//!
//! The history cache persists two string values under fixed keys in the
//! `local_storage` table. A missing key maps to `None`.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use voicestream_core::domain::{HISTORY_STORAGE_KEY, TOTAL_REQUESTS_STORAGE_KEY};
use voicestream_core::{HistoryStore, RepositoryError, StoredHistory};

use super::row_mappers::storage_error;

pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn load(&self) -> Result<StoredHistory, RepositoryError> {
        let rows = sqlx::query("SELECT key, value FROM local_storage WHERE key IN (?, ?)")
            .bind(HISTORY_STORAGE_KEY)
            .bind(TOTAL_REQUESTS_STORAGE_KEY)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let mut stored = StoredHistory::default();
        for row in rows {
            let key: String = row.try_get("key").map_err(storage_error)?;
            let value: String = row.try_get("value").map_err(storage_error)?;
            match key.as_str() {
                HISTORY_STORAGE_KEY => stored.history = Some(value),
                TOTAL_REQUESTS_STORAGE_KEY => stored.total_requests = Some(value),
                _ => {}
            }
        }

        Ok(stored)
    }

    async fn save(&self, stored: &StoredHistory) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        for (key, value) in [
            (HISTORY_STORAGE_KEY, &stored.history),
            (TOTAL_REQUESTS_STORAGE_KEY, &stored.total_requests),
        ] {
            match value {
                Some(value) => {
                    sqlx::query("INSERT OR REPLACE INTO local_storage (key, value) VALUES (?, ?)")
                        .bind(key)
                        .bind(value)
                        .execute(&mut *tx)
                        .await
                        .map_err(storage_error)?;
                }
                None => {
                    sqlx::query("DELETE FROM local_storage WHERE key = ?")
                        .bind(key)
                        .execute(&mut *tx)
                        .await
                        .map_err(storage_error)?;
                }
            }
        }

        tx.commit().await.map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let store = SqliteHistoryStore::new(setup_test_database().await.unwrap());
        assert_eq!(store.load().await.unwrap(), StoredHistory::default());
    }

    #[tokio::test]
    async fn save_overwrites_and_deletes_keys() {
        let store = SqliteHistoryStore::new(setup_test_database().await.unwrap());

        let first = StoredHistory {
            history: Some("[]".into()),
            total_requests: Some("3".into()),
        };
        store.save(&first).await.unwrap();
        assert_eq!(store.load().await.unwrap(), first);

        let second = StoredHistory {
            history: None,
            total_requests: Some("4".into()),
        };
        store.save(&second).await.unwrap();
        assert_eq!(store.load().await.unwrap(), second);
    }
}
