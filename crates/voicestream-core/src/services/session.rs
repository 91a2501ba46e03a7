//! Session tracking: upsert-by-owner pings and the periodic heartbeat.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::domain::Session;
use crate::events::AppEvent;
use crate::ports::{AppEventEmitter, CoreError, SessionRepository};

/// Interval between heartbeat pings while a user is present.
pub const SESSION_PING_INTERVAL: Duration = Duration::from_secs(30);

pub struct SessionService {
    repo: Arc<dyn SessionRepository>,
    emitter: Arc<dyn AppEventEmitter>,
}

impl SessionService {
    pub fn new(repo: Arc<dyn SessionRepository>, emitter: Arc<dyn AppEventEmitter>) -> Self {
        Self { repo, emitter }
    }

    /// Record activity for `owner`.
    ///
    /// Refreshes the owner's existing record or inserts one. The lookup and
    /// the insert are separate steps, so two concurrent first pings for the
    /// same owner can both insert. Without an owner this does nothing.
    pub async fn ping(
        &self,
        owner: Option<&str>,
        is_active: bool,
    ) -> Result<Option<Session>, CoreError> {
        let Some(owner) = owner.filter(|o| !o.is_empty()) else {
            return Ok(None);
        };
        let now = Utc::now().timestamp_millis();

        let session = match self.repo.find_by_owner(owner).await? {
            Some(existing) => self.repo.patch(existing.id, is_active, now).await?,
            None => self.repo.insert(owner, is_active, now).await?,
        };

        tracing::debug!(owner, is_active, "Session ping");
        self.emitter.emit(AppEvent::session_updated(session.clone()));
        Ok(Some(session))
    }
}

/// Background task that keeps an owner's session marked active.
///
/// Pings immediately, then every interval. [`SessionHeartbeat::stop`]
/// sends a final inactive ping.
pub struct SessionHeartbeat {
    service: Arc<SessionService>,
    owner: String,
    task: JoinHandle<()>,
}

impl SessionHeartbeat {
    pub fn start(service: Arc<SessionService>, owner: impl Into<String>, every: Duration) -> Self {
        let owner = owner.into();
        let task = {
            let service = Arc::clone(&service);
            let owner = owner.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(every);
                loop {
                    ticker.tick().await;
                    if let Err(e) = service.ping(Some(&owner), true).await {
                        tracing::warn!(error = %e, "Session heartbeat failed");
                    }
                }
            })
        };
        Self {
            service,
            owner,
            task,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Stop pinging and mark the session inactive.
    pub async fn stop(self) -> Result<Option<Session>, CoreError> {
        self.task.abort();
        self.service.ping(Some(&self.owner), false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NoopEmitter;
    use crate::services::test_support::{InMemorySessions, RecordingEmitter};

    #[tokio::test]
    async fn ping_without_owner_is_a_no_op() {
        let repo = Arc::new(InMemorySessions::default());
        let emitter = Arc::new(RecordingEmitter::default());
        let service = SessionService::new(repo.clone(), emitter.clone());

        assert_eq!(service.ping(None, true).await.unwrap(), None);
        assert_eq!(service.ping(Some(""), true).await.unwrap(), None);
        assert!(emitter.names().is_empty());
    }

    #[tokio::test]
    async fn repeated_pings_update_one_record() {
        let repo = Arc::new(InMemorySessions::default());
        let service = SessionService::new(repo.clone(), Arc::new(NoopEmitter::new()));

        let first = service.ping(Some("u1"), true).await.unwrap().unwrap();
        let second = service.ping(Some("u1"), false).await.unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert!(!second.is_active);
        assert!(second.last_activity >= first.last_activity);
        assert_eq!(repo.list_by_owner("u1").await.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn heartbeat_pings_until_stopped() {
        let repo = Arc::new(InMemorySessions::default());
        let emitter = Arc::new(RecordingEmitter::default());
        let service = Arc::new(SessionService::new(repo.clone(), emitter.clone()));

        let heartbeat = SessionHeartbeat::start(service, "u1", SESSION_PING_INTERVAL);
        tokio::time::sleep(Duration::from_secs(61)).await;

        // t = 0, 30 and 60
        assert_eq!(emitter.names().len(), 3);
        assert!(repo.find_by_owner("u1").await.unwrap().unwrap().is_active);

        let last = heartbeat.stop().await.unwrap().unwrap();
        assert!(!last.is_active);
        assert_eq!(repo.list_by_owner("u1").await.unwrap().len(), 1);
    }
}
