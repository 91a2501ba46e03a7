//! Request ledger repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewSpeechRequest, RequestId, RequestStatus, SpeechRequest, StatusUpdate};

/// Durable store of submitted speech requests.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Defaults (voice, speed, status) are resolved by the service, not here
#[async_trait]
pub trait RequestLedgerRepository: Send + Sync {
    /// Insert a request with the given status and return the stored record.
    async fn insert(
        &self,
        request: &NewSpeechRequest,
        status: RequestStatus,
    ) -> Result<SpeechRequest, RepositoryError>;

    /// List requests for an owner, most recent first, at most `limit`.
    async fn list_by_owner(
        &self,
        owner: &str,
        limit: usize,
    ) -> Result<Vec<SpeechRequest>, RepositoryError>;

    /// Fetch a single request.
    async fn get(&self, id: RequestId) -> Result<Option<SpeechRequest>, RepositoryError>;

    /// Apply a partial status update.
    ///
    /// Fails with `NotFound` when no request has this id.
    async fn update_status(
        &self,
        id: RequestId,
        update: &StatusUpdate,
    ) -> Result<SpeechRequest, RepositoryError>;
}
