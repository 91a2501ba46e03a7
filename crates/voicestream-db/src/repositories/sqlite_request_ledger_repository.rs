//! `SQLite` implementation of the `RequestLedgerRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use voicestream_core::{
    NewSpeechRequest, RepositoryError, RequestId, RequestLedgerRepository, RequestStatus,
    SpeechRequest, StatusUpdate,
};

use super::row_mappers::{REQUEST_SELECT_COLUMNS, row_to_request, storage_error};

pub struct SqliteRequestLedgerRepository {
    pool: SqlitePool,
}

impl SqliteRequestLedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: RequestId) -> Result<Option<SpeechRequest>, RepositoryError> {
        let sql = format!("SELECT {REQUEST_SELECT_COLUMNS} FROM speech_requests WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(row_to_request).transpose()
    }
}

#[async_trait]
impl RequestLedgerRepository for SqliteRequestLedgerRepository {
    async fn insert(
        &self,
        request: &NewSpeechRequest,
        status: RequestStatus,
    ) -> Result<SpeechRequest, RepositoryError> {
        let created_at = chrono::Utc::now().timestamp_millis();

        let result = sqlx::query(
            "INSERT INTO speech_requests (owner, text, status, voice, speed, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.owner)
        .bind(&request.text)
        .bind(status.as_str())
        .bind(&request.voice)
        .bind(request.speed)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(SpeechRequest {
            id: RequestId(result.last_insert_rowid()),
            owner: request.owner.clone(),
            text: request.text.clone(),
            status,
            voice: request.voice.clone(),
            speed: request.speed,
            audio_url: None,
            error_message: None,
            created_at,
        })
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        limit: usize,
    ) -> Result<Vec<SpeechRequest>, RepositoryError> {
        let sql = format!(
            "SELECT {REQUEST_SELECT_COLUMNS} FROM speech_requests
             WHERE owner = ?
             ORDER BY id DESC
             LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(owner)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(row_to_request).collect()
    }

    async fn get(&self, id: RequestId) -> Result<Option<SpeechRequest>, RepositoryError> {
        self.fetch(id).await
    }

    async fn update_status(
        &self,
        id: RequestId,
        update: &StatusUpdate,
    ) -> Result<SpeechRequest, RepositoryError> {
        // NULL keeps the column, '' clears it, anything else replaces it.
        let result = sqlx::query(
            "UPDATE speech_requests SET
                status = ?,
                audio_url = CASE WHEN ? IS NULL THEN audio_url WHEN ? = '' THEN NULL ELSE ? END,
                error_message = CASE WHEN ? IS NULL THEN error_message WHEN ? = '' THEN NULL ELSE ? END
             WHERE id = ?",
        )
        .bind(update.status.as_str())
        .bind(&update.audio_url)
        .bind(&update.audio_url)
        .bind(&update.audio_url)
        .bind(&update.error_message)
        .bind(&update.error_message)
        .bind(&update.error_message)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("speech request {id}")));
        }

        self.fetch(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("speech request {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteRequestLedgerRepository {
        SqliteRequestLedgerRepository::new(setup_test_database().await.unwrap())
    }

    fn new_request(text: &str, owner: Option<&str>) -> NewSpeechRequest {
        NewSpeechRequest {
            text: text.into(),
            owner: owner.map(str::to_string),
            voice: Some("nova".into()),
            speed: Some(1.25),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = repo().await;
        let stored = repo
            .insert(&new_request("Hello", Some("u1")), RequestStatus::Completed)
            .await
            .unwrap();

        let fetched = repo.get(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.speed, Some(1.25));
        assert!(repo.get(RequestId(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_owner_orders_newest_first_and_limits() {
        let repo = repo().await;
        for i in 0..5 {
            repo.insert(&new_request(&format!("a{i}"), Some("a")), RequestStatus::Completed)
                .await
                .unwrap();
        }
        repo.insert(&new_request("b", Some("b")), RequestStatus::Completed)
            .await
            .unwrap();
        repo.insert(&new_request("none", None), RequestStatus::Completed)
            .await
            .unwrap();

        let listed = repo.list_by_owner("a", 3).await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a4", "a3", "a2"]);
    }

    #[tokio::test]
    async fn update_keeps_clears_and_sets_fields() {
        let repo = repo().await;
        let stored = repo
            .insert(&new_request("x", Some("u1")), RequestStatus::Completed)
            .await
            .unwrap();

        let errored = repo
            .update_status(
                stored.id,
                &StatusUpdate::new(RequestStatus::Error).with_error_message("timeout"),
            )
            .await
            .unwrap();
        assert_eq!(errored.status, RequestStatus::Error);
        assert_eq!(errored.audio_url, None);
        assert_eq!(errored.error_message.as_deref(), Some("timeout"));

        let completed = repo
            .update_status(
                stored.id,
                &StatusUpdate::new(RequestStatus::Completed).with_audio_url("x"),
            )
            .await
            .unwrap();
        assert_eq!(completed.audio_url.as_deref(), Some("x"));
        assert_eq!(completed.error_message.as_deref(), Some("timeout"));

        let cleared = repo
            .update_status(
                stored.id,
                &StatusUpdate::new(RequestStatus::Completed).with_error_message(""),
            )
            .await
            .unwrap();
        assert_eq!(cleared.error_message, None);
        assert_eq!(cleared.audio_url.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn update_missing_request_is_not_found() {
        let repo = repo().await;
        let result = repo
            .update_status(RequestId(5), &StatusUpdate::new(RequestStatus::Error))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }
}
