//! Durable key-value storage for the local history cache.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::StoredHistory;

/// Storage for the two history keys.
///
/// Values are opaque strings; encoding belongs to `HistorySnapshot`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read both keys. Missing keys come back as `None`.
    async fn load(&self) -> Result<StoredHistory, RepositoryError>;

    /// Write both keys. A `None` value removes the key.
    async fn save(&self, stored: &StoredHistory) -> Result<(), RepositoryError>;
}
