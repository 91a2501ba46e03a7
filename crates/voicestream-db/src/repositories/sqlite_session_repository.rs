//! `SQLite` implementation of the `SessionRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use voicestream_core::{RepositoryError, Session, SessionRepository};

use super::row_mappers::{SESSION_SELECT_COLUMNS, row_to_session, storage_error};

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn find_by_owner(&self, owner: &str) -> Result<Option<Session>, RepositoryError> {
        let sql =
            format!("SELECT {SESSION_SELECT_COLUMNS} FROM sessions WHERE owner = ? ORDER BY id LIMIT 1");
        let row = sqlx::query(&sql)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn insert(
        &self,
        owner: &str,
        is_active: bool,
        last_activity: i64,
    ) -> Result<Session, RepositoryError> {
        let result =
            sqlx::query("INSERT INTO sessions (owner, is_active, last_activity) VALUES (?, ?, ?)")
                .bind(owner)
                .bind(is_active)
                .bind(last_activity)
                .execute(&self.pool)
                .await
                .map_err(storage_error)?;

        Ok(Session {
            id: result.last_insert_rowid(),
            owner: Some(owner.to_string()),
            is_active,
            last_activity,
        })
    }

    async fn patch(
        &self,
        id: i64,
        is_active: bool,
        last_activity: i64,
    ) -> Result<Session, RepositoryError> {
        let sql = format!(
            "UPDATE sessions SET is_active = ?, last_activity = ? WHERE id = ?
             RETURNING {SESSION_SELECT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(is_active)
            .bind(last_activity)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        match row {
            Some(row) => row_to_session(&row),
            None => Err(RepositoryError::NotFound(format!("session {id}"))),
        }
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Session>, RepositoryError> {
        let sql = format!("SELECT {SESSION_SELECT_COLUMNS} FROM sessions WHERE owner = ? ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(row_to_session).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    #[tokio::test]
    async fn insert_find_and_patch() {
        let repo = SqliteSessionRepository::new(setup_test_database().await.unwrap());
        assert!(repo.find_by_owner("u1").await.unwrap().is_none());

        let created = repo.insert("u1", true, 1_000).await.unwrap();
        let found = repo.find_by_owner("u1").await.unwrap().unwrap();
        assert_eq!(found, created);

        let patched = repo.patch(created.id, false, 2_000).await.unwrap();
        assert!(!patched.is_active);
        assert_eq!(patched.last_activity, 2_000);
        assert_eq!(patched.owner.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn duplicate_owners_are_allowed() {
        let repo = SqliteSessionRepository::new(setup_test_database().await.unwrap());
        let first = repo.insert("u1", true, 1).await.unwrap();
        repo.insert("u1", true, 2).await.unwrap();

        assert_eq!(repo.list_by_owner("u1").await.unwrap().len(), 2);
        assert_eq!(repo.find_by_owner("u1").await.unwrap().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn patch_missing_session_is_not_found() {
        let repo = SqliteSessionRepository::new(setup_test_database().await.unwrap());
        assert!(matches!(
            repo.patch(42, true, 1).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
