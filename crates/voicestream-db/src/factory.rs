//! Composition utilities for wiring the core services with `SQLite` backends.
//!
//! Construction only. No domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use voicestream_core::Repos;

use crate::repositories::{
    SqliteHistoryStore, SqliteRequestLedgerRepository, SqliteSessionRepository,
    SqliteSettingsRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:~/.voicestream/voicestream.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Create an in-memory `SQLite` pool with the schema applied.
    pub async fn create_test_pool() -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        crate::setup::create_schema(&pool).await?;
        Ok(pool)
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// Adapters compose services from the returned [`Repos`].
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteRequestLedgerRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool.clone())),
            Arc::new(SqliteHistoryStore::new(pool.clone())),
            Arc::new(SqliteSettingsRepository::new(pool)),
        )
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = CoreFactory::create_test_pool().await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicestream_core::{NewSpeechRequest, RequestStatus};

    #[tokio::test]
    async fn repos_share_one_database() {
        let db = TestDb::new().await.unwrap();
        let repos = db.repos();

        let stored = repos
            .requests
            .insert(
                &NewSpeechRequest::new("shared").with_owner("u1"),
                RequestStatus::Completed,
            )
            .await
            .unwrap();

        let again = db.repos();
        let fetched = again.requests.get(stored.id).await.unwrap();
        assert_eq!(fetched.map(|r| r.text), Some("shared".to_string()));
    }
}
