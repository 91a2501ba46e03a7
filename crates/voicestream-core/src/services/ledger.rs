//! Request ledger service.
//!
//! Every submitted request is stored as completed immediately: synthesis
//! happens on the caller's device, so the ledger is an activity log rather
//! than a work queue.

use std::sync::Arc;

use crate::domain::{
    DEFAULT_SPEED, DEFAULT_VOICE, LEDGER_LIST_LIMIT, NewSpeechRequest, RequestId, RequestStatus,
    SpeechRequest, StatusUpdate,
};
use crate::events::AppEvent;
use crate::ports::{AppEventEmitter, CoreError, RequestLedgerRepository};

pub struct LedgerService {
    repo: Arc<dyn RequestLedgerRepository>,
    emitter: Arc<dyn AppEventEmitter>,
}

impl LedgerService {
    pub fn new(repo: Arc<dyn RequestLedgerRepository>, emitter: Arc<dyn AppEventEmitter>) -> Self {
        Self { repo, emitter }
    }

    /// Store a request and return its id.
    ///
    /// A missing or empty voice becomes `alloy`; a missing or zero speed
    /// becomes 1.0. Text length is not checked here.
    pub async fn submit(&self, request: NewSpeechRequest) -> Result<RequestId, CoreError> {
        let request = apply_defaults(request)?;
        let stored = self.repo.insert(&request, RequestStatus::Completed).await?;

        tracing::info!(
            id = %stored.id,
            owner = stored.owner.as_deref().unwrap_or("-"),
            "Speech request recorded"
        );
        let id = stored.id;
        self.emitter.emit(AppEvent::request_created(stored));
        Ok(id)
    }

    /// Most recent requests for `owner`, newest first, at most 50.
    ///
    /// Without an owner nothing is listed.
    pub async fn list_recent(&self, owner: Option<&str>) -> Result<Vec<SpeechRequest>, CoreError> {
        let Some(owner) = owner.filter(|o| !o.is_empty()) else {
            return Ok(Vec::new());
        };
        let requests = self.repo.list_by_owner(owner, LEDGER_LIST_LIMIT).await?;
        Ok(requests)
    }

    pub async fn get(&self, id: RequestId) -> Result<Option<SpeechRequest>, CoreError> {
        Ok(self.repo.get(id).await?)
    }

    /// Apply a partial status update and return the updated record.
    pub async fn update_status(
        &self,
        id: RequestId,
        update: StatusUpdate,
    ) -> Result<SpeechRequest, CoreError> {
        let updated = self.repo.update_status(id, &update).await?;
        tracing::debug!(%id, status = %updated.status, "Speech request status changed");
        self.emitter
            .emit(AppEvent::request_status_changed(updated.clone()));
        Ok(updated)
    }
}

fn apply_defaults(mut request: NewSpeechRequest) -> Result<NewSpeechRequest, CoreError> {
    if request.voice.as_deref().is_none_or(str::is_empty) {
        request.voice = Some(DEFAULT_VOICE.to_string());
    }

    let speed = match request.speed {
        Some(speed) if !speed.is_finite() || speed < 0.0 => {
            return Err(CoreError::Validation(format!(
                "Speed must be a positive number, got {speed}"
            )));
        }
        Some(speed) if speed > 0.0 => speed,
        _ => DEFAULT_SPEED,
    };
    request.speed = Some(speed);

    if request.owner.as_deref().is_some_and(str::is_empty) {
        request.owner = None;
    }
    Ok(request)
}
