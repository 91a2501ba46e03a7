//! Row mapping helpers for `SQLite` queries.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use voicestream_core::{RepositoryError, RequestId, RequestStatus, Session, SpeechRequest};

/// Shared SELECT column list for speech request queries.
pub const REQUEST_SELECT_COLUMNS: &str =
    "id, owner, text, status, voice, speed, audio_url, error_message, created_at";

/// Shared SELECT column list for session queries.
pub const SESSION_SELECT_COLUMNS: &str = "id, owner, is_active, last_activity";

/// Map a sqlx failure onto the port error, keeping constraint violations distinct.
pub fn storage_error(e: sqlx::Error) -> RepositoryError {
    use sqlx::error::ErrorKind;

    match e.as_database_error().map(|db| db.kind()) {
        Some(
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation,
        ) => RepositoryError::Constraint(e.to_string()),
        _ => RepositoryError::Storage(e.to_string()),
    }
}

/// Parse a database row into a `SpeechRequest`.
pub fn row_to_request(row: &SqliteRow) -> Result<SpeechRequest, RepositoryError> {
    let status_str: String = row.try_get("status").map_err(storage_error)?;
    let status = RequestStatus::parse(&status_str).ok_or_else(|| {
        RepositoryError::Serialization(format!("unknown request status '{status_str}'"))
    })?;

    Ok(SpeechRequest {
        id: RequestId(row.try_get("id").map_err(storage_error)?),
        owner: row.try_get("owner").map_err(storage_error)?,
        text: row.try_get("text").map_err(storage_error)?,
        status,
        voice: row.try_get("voice").map_err(storage_error)?,
        speed: row.try_get("speed").map_err(storage_error)?,
        audio_url: row.try_get("audio_url").map_err(storage_error)?,
        error_message: row.try_get("error_message").map_err(storage_error)?,
        created_at: row.try_get("created_at").map_err(storage_error)?,
    })
}

/// Parse a database row into a `Session`.
pub fn row_to_session(row: &SqliteRow) -> Result<Session, RepositoryError> {
    Ok(Session {
        id: row.try_get("id").map_err(storage_error)?,
        owner: row.try_get("owner").map_err(storage_error)?,
        is_active: row.try_get("is_active").map_err(storage_error)?,
        last_activity: row.try_get("last_activity").map_err(storage_error)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    #[tokio::test]
    async fn check_violation_maps_to_constraint() {
        let pool = setup_test_database().await.unwrap();
        let err = sqlx::query(
            "INSERT INTO speech_requests (text, status, created_at) VALUES ('x', 'bogus', 0)",
        )
        .execute(&pool)
        .await
        .map_err(storage_error)
        .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn not_null_violation_maps_to_constraint() {
        let pool = setup_test_database().await.unwrap();
        let err = sqlx::query("INSERT INTO speech_requests (status, created_at) VALUES ('pending', 0)")
            .execute(&pool)
            .await
            .map_err(storage_error)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_table_stays_storage() {
        let pool = setup_test_database().await.unwrap();
        let err = sqlx::query("SELECT * FROM no_such_table")
            .execute(&pool)
            .await
            .map_err(storage_error)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Storage(_)), "got {err:?}");
    }
}
