//! In-memory port implementations shared by service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{
    NewSpeechRequest, PlatformVoice, RequestId, RequestStatus, Session, SpeechRequest,
    StatusUpdate, StoredHistory, Utterance,
};
use crate::events::AppEvent;
use crate::ports::{
    AppEventEmitter, HistoryStore, Notification, Notifier, RepositoryError,
    RequestLedgerRepository, SessionRepository, SettingsRepository, SpeechError, SpeechPlatform,
    VoicesReady,
};
use crate::settings::Settings;

#[derive(Default)]
pub struct InMemoryLedger {
    rows: Mutex<Vec<SpeechRequest>>,
}

#[async_trait]
impl RequestLedgerRepository for InMemoryLedger {
    async fn insert(
        &self,
        request: &NewSpeechRequest,
        status: RequestStatus,
    ) -> Result<SpeechRequest, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let stored = SpeechRequest {
            id: RequestId(rows.len() as i64 + 1),
            owner: request.owner.clone(),
            text: request.text.clone(),
            status,
            voice: request.voice.clone(),
            speed: request.speed,
            audio_url: None,
            error_message: None,
            created_at: 1_700_000_000_000 + rows.len() as i64,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        limit: usize,
    ) -> Result<Vec<SpeechRequest>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.owner.as_deref() == Some(owner))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: RequestId) -> Result<Option<SpeechRequest>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: RequestId,
        update: &StatusUpdate,
    ) -> Result<SpeechRequest, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("speech request {id}")))?;
        update.apply(row);
        Ok(row.clone())
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    rows: Mutex<Vec<Session>>,
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn find_by_owner(&self, owner: &str) -> Result<Option<Session>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|s| s.owner.as_deref() == Some(owner))
            .cloned())
    }

    async fn insert(
        &self,
        owner: &str,
        is_active: bool,
        last_activity: i64,
    ) -> Result<Session, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let session = Session {
            id: rows.len() as i64 + 1,
            owner: Some(owner.to_string()),
            is_active,
            last_activity,
        };
        rows.push(session.clone());
        Ok(session)
    }

    async fn patch(
        &self,
        id: i64,
        is_active: bool,
        last_activity: i64,
    ) -> Result<Session, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("session {id}")))?;
        row.is_active = is_active;
        row.last_activity = last_activity;
        Ok(row.clone())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Session>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|s| s.owner.as_deref() == Some(owner))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryHistoryStore {
    pub stored: Mutex<StoredHistory>,
    pub fail_writes: std::sync::atomic::AtomicBool,
    pub saves: AtomicUsize,
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<StoredHistory, RepositoryError> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, stored: &StoredHistory) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("quota exceeded".into()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = stored.clone();
        Ok(())
    }
}

pub struct MockSettingsRepo {
    settings: Mutex<Settings>,
}

impl MockSettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(Settings::with_defaults()),
        }
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepo {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        *self.settings.lock().unwrap() = settings.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingEmitter {
    pub events: Mutex<Vec<AppEvent>>,
}

impl RecordingEmitter {
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(AppEvent::event_name)
            .collect()
    }
}

impl AppEventEmitter for RecordingEmitter {
    fn emit(&self, event: AppEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(Self {
            events: Mutex::new(self.events.lock().unwrap().clone()),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// How `FakePlatform::play` behaves.
#[derive(Debug, Clone)]
pub enum PlayOutcome {
    Finish,
    Fail(String),
    /// Never finishes on its own.
    Hang,
}

pub struct FakePlatform {
    pub available: bool,
    pub ready: VoicesReady,
    pub voices: Vec<PlatformVoice>,
    /// Number of `list_voices` calls that return an empty list first.
    pub empty_listings: usize,
    pub outcome: Mutex<PlayOutcome>,
    pub played: Mutex<Vec<Utterance>>,
    pub list_calls: AtomicUsize,
}

impl FakePlatform {
    pub fn new(voices: &[&str]) -> Self {
        Self {
            available: true,
            ready: VoicesReady::Unsupported,
            voices: voices
                .iter()
                .map(|name| PlatformVoice::new(*name, "en-US"))
                .collect(),
            empty_listings: 0,
            outcome: Mutex::new(PlayOutcome::Finish),
            played: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(&[])
        }
    }

    pub fn set_outcome(&self, outcome: PlayOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }
}

#[async_trait]
impl SpeechPlatform for FakePlatform {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn list_voices(&self) -> Result<Vec<PlatformVoice>, SpeechError> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if call < self.empty_listings {
            return Ok(Vec::new());
        }
        Ok(self.voices.clone())
    }

    async fn voices_ready(&self) -> VoicesReady {
        self.ready
    }

    async fn play(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.played.lock().unwrap().push(utterance.clone());
        let outcome = self.outcome.lock().unwrap().clone();
        match outcome {
            PlayOutcome::Finish => Ok(()),
            PlayOutcome::Fail(reason) => Err(SpeechError::Platform(reason)),
            PlayOutcome::Hang => std::future::pending().await,
        }
    }
}
