//! Session repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Session;

/// Durable per-user activity records.
///
/// Storage does not enforce one record per owner. Callers keep that
/// property by looking up before inserting.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// First record stored for `owner`, if any.
    async fn find_by_owner(&self, owner: &str) -> Result<Option<Session>, RepositoryError>;

    /// Insert a new record.
    async fn insert(
        &self,
        owner: &str,
        is_active: bool,
        last_activity: i64,
    ) -> Result<Session, RepositoryError>;

    /// Refresh an existing record.
    async fn patch(
        &self,
        id: i64,
        is_active: bool,
        last_activity: i64,
    ) -> Result<Session, RepositoryError>;

    /// Every record stored for `owner`. Duplicates are possible.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Session>, RepositoryError>;
}
