//! The speech session: one owned object behind every user command.
//!
//! `SpeechController` ties the synthesis adapter, the history cache and the
//! optional ledger together and turns utterance lifecycle events into user
//! notifications. Adapters (terminal, HTTP) hold one controller per user
//! session and call it from their command handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

use crate::domain::{
    DEFAULT_VOICE_LABEL, NewSpeechRequest, PITCH_RANGE, PlatformVoice, QuickText, RequestId,
    SPEED_RANGE, Utterance, VoiceId, clip_text, quick_text, select_platform_voice,
};
use crate::ports::{CoreError, Notification, Notifier, SpeechError};
use crate::services::history_cache::HistoryCache;
use crate::services::ledger::LedgerService;
use crate::services::synthesis::{UtteranceEvent, UtteranceId, VoiceSynthesisAdapter};
use crate::settings::{Settings, SettingsError};

/// Which platform voice to use for the next utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceChoice {
    /// Let the platform decide.
    Default,
    /// Map an abstract voice id onto the platform's voices.
    Mapped(VoiceId),
    /// Use a platform voice by exact name.
    Platform(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechPreferences {
    pub voice: VoiceChoice,
    pub speed: f64,
    pub pitch: f64,
}

impl SpeechPreferences {
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            voice: VoiceChoice::Mapped(settings.effective_voice()),
            speed: settings.effective_speed(),
            pitch: settings.effective_pitch(),
        }
    }
}

impl Default for SpeechPreferences {
    fn default() -> Self {
        Self::from_settings(&Settings::with_defaults())
    }
}

/// What a successful `speak` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenRequest {
    pub utterance: UtteranceId,
    pub history_id: i64,
    /// Set when the request was also written to the ledger.
    pub ledger_id: Option<RequestId>,
}

/// Notifier wrapper that drops routine notifications while live mode is off.
pub struct LiveGate {
    inner: Arc<dyn Notifier>,
    live: AtomicBool,
}

impl LiveGate {
    pub fn new(inner: Arc<dyn Notifier>, live: bool) -> Self {
        Self {
            inner,
            live: AtomicBool::new(live),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    pub fn set_live(&self, live: bool) {
        self.live.store(live, Ordering::SeqCst);
    }
}

impl Notifier for LiveGate {
    fn notify(&self, notification: Notification) {
        if self.is_live() || notification.kind.bypasses_live_mode() {
            self.inner.notify(notification);
        }
    }
}

/// Notification shown for an utterance lifecycle event.
pub fn utterance_notification(event: &UtteranceEvent) -> Option<Notification> {
    match event {
        UtteranceEvent::Started { .. } => Some(Notification::success(
            "Speech Started",
            "Text-to-speech synthesis has begun.",
        )),
        UtteranceEvent::Ended {
            interrupted: false, ..
        } => Some(Notification::info(
            "Speech Completed",
            "Text-to-speech synthesis finished.",
        )),
        UtteranceEvent::Ended {
            interrupted: true, ..
        } => None,
        UtteranceEvent::Failed { reason, .. } => Some(Notification::error(
            "Speech Error",
            format!("An error occurred: {reason}"),
        )),
    }
}

pub struct SpeechController {
    adapter: Arc<VoiceSynthesisAdapter>,
    history: HistoryCache,
    ledger: Option<(Arc<LedgerService>, String)>,
    notifier: Arc<LiveGate>,
    preferences: SpeechPreferences,
    unsupported_warned: bool,
    relay: JoinHandle<()>,
}

impl SpeechController {
    /// Build a controller and start relaying utterance events to `notifier`.
    pub fn new(
        adapter: Arc<VoiceSynthesisAdapter>,
        history: HistoryCache,
        notifier: Arc<dyn Notifier>,
        live: bool,
    ) -> Self {
        let notifier = Arc::new(LiveGate::new(notifier, live));
        let relay = {
            let mut events = adapter.subscribe();
            let notifier = Arc::clone(&notifier);
            tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if let Some(notification) = utterance_notification(&event) {
                                notifier.notify(notification);
                            }
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "Notification relay lagged");
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    }
                }
            })
        };

        Self {
            adapter,
            history,
            ledger: None,
            notifier,
            preferences: SpeechPreferences::default(),
            unsupported_warned: false,
            relay,
        }
    }

    /// Also record each speak in the ledger under `owner`.
    #[must_use]
    pub fn with_ledger(mut self, ledger: Arc<LedgerService>, owner: impl Into<String>) -> Self {
        self.ledger = Some((ledger, owner.into()));
        self
    }

    #[must_use]
    pub fn with_preferences(mut self, preferences: SpeechPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn adapter(&self) -> &Arc<VoiceSynthesisAdapter> {
        &self.adapter
    }

    pub const fn history(&self) -> &HistoryCache {
        &self.history
    }

    pub const fn preferences(&self) -> &SpeechPreferences {
        &self.preferences
    }

    pub fn owner(&self) -> Option<&str> {
        self.ledger.as_ref().map(|(_, owner)| owner.as_str())
    }

    pub fn select_voice(&mut self, choice: VoiceChoice) {
        self.preferences.voice = choice;
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), SettingsError> {
        if !SPEED_RANGE.contains(&speed) {
            return Err(SettingsError::InvalidSpeed(speed));
        }
        self.preferences.speed = speed;
        Ok(())
    }

    pub fn set_pitch(&mut self, pitch: f64) -> Result<(), SettingsError> {
        if !PITCH_RANGE.contains(&pitch) {
            return Err(SettingsError::InvalidPitch(pitch));
        }
        self.preferences.pitch = pitch;
        Ok(())
    }

    pub fn is_live(&self) -> bool {
        self.notifier.is_live()
    }

    /// Switch live mode. The confirmation is shown in both directions.
    pub fn set_live(&self, live: bool) {
        if live {
            self.notifier.set_live(true);
            self.notifier.notify(Notification::success(
                "Live Mode Enabled",
                "You will now receive real-time notifications.",
            ));
        } else {
            self.notifier.notify(Notification::info(
                "Live Mode Disabled",
                "Real-time notifications are now paused.",
            ));
            self.notifier.set_live(false);
        }
    }

    /// The live-mode aware notifier, for adapters that raise their own
    /// notifications.
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    /// Platform voice the current preferences resolve to.
    pub fn resolved_voice(&self) -> Option<PlatformVoice> {
        let voices = self.adapter.voices();
        match &self.preferences.voice {
            VoiceChoice::Default => None,
            VoiceChoice::Mapped(id) => select_platform_voice(*id, &voices).cloned(),
            VoiceChoice::Platform(name) => voices.into_iter().find(|v| &v.name == name),
        }
    }

    /// Speak `text` with the current preferences.
    ///
    /// Text beyond 500 characters is dropped. On success the action is
    /// added to history and, when an owner is configured, to the ledger.
    pub async fn speak(&mut self, text: &str) -> Result<SpokenRequest, CoreError> {
        let text = clip_text(text).trim().to_string();
        if text.is_empty() {
            self.notifier.notify(Notification::warning(
                "No text provided",
                "Please enter some text to convert to speech.",
            ));
            return Err(SpeechError::EmptyInput.into());
        }

        if !self.adapter.is_supported() {
            if !self.unsupported_warned {
                self.unsupported_warned = true;
                self.notifier.notify(Notification::warning(
                    "Speech Not Supported",
                    "No speech synthesis engine is available on this system.",
                ));
            }
            return Err(SpeechError::Unsupported(self.adapter.platform_name().to_string()).into());
        }

        let voice = self.resolved_voice();
        let utterance = Utterance {
            text: text.clone(),
            voice: voice.as_ref().map(|v| v.name.clone()),
            rate: self.preferences.speed,
            pitch: self.preferences.pitch,
        };
        let utterance_id = self.adapter.speak(utterance)?;

        let display_name = voice.map_or_else(|| DEFAULT_VOICE_LABEL.to_string(), |v| v.name);
        let item = self
            .history
            .record(
                text.clone(),
                display_name,
                self.preferences.speed,
                self.preferences.pitch,
            )
            .await;

        let ledger_id = self.submit_to_ledger(text).await;

        Ok(SpokenRequest {
            utterance: utterance_id,
            history_id: item.id,
            ledger_id,
        })
    }

    async fn submit_to_ledger(&self, text: String) -> Option<RequestId> {
        let (ledger, owner) = self.ledger.as_ref()?;
        let voice = match self.preferences.voice {
            VoiceChoice::Mapped(id) => Some(id.as_str().to_string()),
            VoiceChoice::Default | VoiceChoice::Platform(_) => None,
        };
        let request = NewSpeechRequest {
            text,
            owner: Some(owner.clone()),
            voice,
            speed: Some(self.preferences.speed),
        };

        match ledger.submit(request).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "Could not record speech request");
                self.notifier.notify(Notification::error(
                    "Request Not Saved",
                    format!("The request could not be recorded: {e}"),
                ));
                None
            }
        }
    }

    /// Stop playback immediately.
    pub fn stop(&self) -> bool {
        self.adapter.stop()
    }

    /// Speak a history item again with its original speed and pitch.
    ///
    /// The voice is re-selected by display name when the platform still has
    /// it. Returns `Ok(None)` for an unknown id.
    pub async fn replay(&mut self, id: i64) -> Result<Option<SpokenRequest>, CoreError> {
        let Some(item) = self.history.find(id).cloned() else {
            return Ok(None);
        };

        self.preferences.speed = item.speed;
        self.preferences.pitch = item.pitch;
        if self.adapter.voices().iter().any(|v| v.name == item.voice) {
            self.preferences.voice = VoiceChoice::Platform(item.voice.clone());
        }

        self.speak(&item.text).await.map(Some)
    }

    pub async fn clear_history(&mut self) {
        self.history.clear().await;
    }

    /// Look up a sample text by 1-based position.
    pub fn load_quick_text(&self, position: usize) -> Option<&'static QuickText> {
        let sample = quick_text(position)?;
        self.notifier.notify(Notification::info(
            "Text loaded!",
            "Quick text has been loaded into the input.",
        ));
        Some(sample)
    }
}

impl Drop for SpeechController {
    fn drop(&mut self) {
        self.relay.abort();
    }
}
