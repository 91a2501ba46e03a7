//! Voice synthesis adapter.
//!
//! Wraps a [`SpeechPlatform`] so that at most one utterance plays at a time
//! and every started utterance produces exactly one terminal event.
//!
//! ```text
//! speak(u2) while u1 plays:
//!   Ended { u1, interrupted: true }  ->  Started { u2 }  ->  Ended/Failed { u2 }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::domain::{PlatformVoice, Utterance};
use crate::ports::{SpeechError, SpeechPlatform, VoicesReady};

/// Delays between voice-list polls on platforms without a ready signal.
pub const VOICE_POLL_DELAYS_MS: [u64; 5] = [0, 100, 500, 1000, 2000];

const EVENT_CAPACITY: usize = 64;

/// Identifies one started utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

/// Lifecycle of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    Started { id: UtteranceId },
    /// Playback finished, or was cut short by `stop` or a newer `speak`.
    Ended { id: UtteranceId, interrupted: bool },
    Failed { id: UtteranceId, reason: String },
}

impl UtteranceEvent {
    pub const fn id(&self) -> UtteranceId {
        match self {
            Self::Started { id } | Self::Ended { id, .. } | Self::Failed { id, .. } => *id,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started { .. })
    }
}

struct Playback {
    id: UtteranceId,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct AdapterState {
    next_id: u64,
    current: Option<Playback>,
    voices: Vec<PlatformVoice>,
}

pub struct VoiceSynthesisAdapter {
    platform: Arc<dyn SpeechPlatform>,
    state: Arc<Mutex<AdapterState>>,
    events: broadcast::Sender<UtteranceEvent>,
}

impl VoiceSynthesisAdapter {
    pub fn new(platform: Arc<dyn SpeechPlatform>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            platform,
            state: Arc::new(Mutex::new(AdapterState::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UtteranceEvent> {
        self.events.subscribe()
    }

    pub fn is_supported(&self) -> bool {
        self.platform.is_available()
    }

    pub fn platform_name(&self) -> &str {
        self.platform.name()
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.state).current.is_some()
    }

    /// Voices from the last successful [`load_voices`](Self::load_voices).
    pub fn voices(&self) -> Vec<PlatformVoice> {
        lock(&self.state).voices.clone()
    }

    /// Query the platform's voice list and cache it.
    ///
    /// Waits on the platform's ready signal when it has one; otherwise polls
    /// at [`VOICE_POLL_DELAYS_MS`] until the list is non-empty. An empty
    /// result is not an error.
    pub async fn load_voices(&self) -> Vec<PlatformVoice> {
        if !self.platform.is_available() {
            return Vec::new();
        }

        let voices = match self.platform.voices_ready().await {
            VoicesReady::Signalled => self.query_voices().await,
            VoicesReady::Unsupported => {
                let mut voices = Vec::new();
                for delay in VOICE_POLL_DELAYS_MS {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    voices = self.query_voices().await;
                    if !voices.is_empty() {
                        break;
                    }
                }
                voices
            }
        };

        tracing::debug!(count = voices.len(), platform = self.platform.name(), "Voices loaded");
        lock(&self.state).voices.clone_from(&voices);
        voices
    }

    async fn query_voices(&self) -> Vec<PlatformVoice> {
        self.platform.list_voices().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Voice listing failed");
            Vec::new()
        })
    }

    /// Start speaking, cancelling whatever is playing.
    ///
    /// Returns once playback has started; completion is reported through
    /// [`subscribe`](Self::subscribe).
    pub fn speak(&self, utterance: Utterance) -> Result<UtteranceId, SpeechError> {
        if utterance.text.trim().is_empty() {
            return Err(SpeechError::EmptyInput);
        }
        if !self.platform.is_available() {
            return Err(SpeechError::Unsupported(format!(
                "no speech engine found ({})",
                self.platform.name()
            )));
        }

        let mut state = lock(&self.state);
        if let Some(previous) = state.current.take() {
            self.interrupt(previous);
        }

        state.next_id += 1;
        let id = UtteranceId(state.next_id);
        let _ = self.events.send(UtteranceEvent::Started { id });

        let platform = Arc::clone(&self.platform);
        let shared = Arc::clone(&self.state);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let result = platform.play(&utterance).await;

            let mut state = lock(&shared);
            if state.current.as_ref().is_some_and(|p| p.id == id) {
                state.current = None;
                let event = match result {
                    Ok(()) => UtteranceEvent::Ended {
                        id,
                        interrupted: false,
                    },
                    Err(e) => UtteranceEvent::Failed {
                        id,
                        reason: e.to_string(),
                    },
                };
                let _ = events.send(event);
            }
        });

        state.current = Some(Playback { id, task });
        tracing::debug!(id = id.0, "Utterance started");
        Ok(id)
    }

    /// Cancel the current utterance, if any. Returns whether one was playing.
    pub fn stop(&self) -> bool {
        let previous = lock(&self.state).current.take();
        match previous {
            Some(playback) => {
                self.interrupt(playback);
                true
            }
            None => false,
        }
    }

    fn interrupt(&self, playback: Playback) {
        playback.task.abort();
        let _ = self.events.send(UtteranceEvent::Ended {
            id: playback.id,
            interrupted: true,
        });
    }
}

impl Drop for VoiceSynthesisAdapter {
    fn drop(&mut self) {
        if let Some(playback) = lock(&self.state).current.take() {
            playback.task.abort();
        }
    }
}

/// Wait for the terminal event of `id`.
///
/// Returns `None` if the adapter went away first.
pub async fn wait_for_terminal(
    events: &mut broadcast::Receiver<UtteranceEvent>,
    id: UtteranceId,
) -> Option<UtteranceEvent> {
    loop {
        match events.recv().await {
            Ok(event) if event.id() == id && event.is_terminal() => return Some(event),
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

fn lock(state: &Mutex<AdapterState>) -> MutexGuard<'_, AdapterState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{FakePlatform, PlayOutcome};
    use std::sync::atomic::Ordering;

    fn utterance(text: &str) -> Utterance {
        Utterance {
            text: text.into(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }

    #[tokio::test]
    async fn finished_playback_emits_started_then_ended() {
        let adapter = VoiceSynthesisAdapter::new(Arc::new(FakePlatform::new(&["Alex"])));
        let mut events = adapter.subscribe();

        let id = adapter.speak(utterance("hello")).unwrap();

        assert_eq!(events.recv().await.unwrap(), UtteranceEvent::Started { id });
        assert_eq!(
            wait_for_terminal(&mut events, id).await,
            Some(UtteranceEvent::Ended {
                id,
                interrupted: false
            })
        );
        assert!(!adapter.is_playing());
    }

    #[tokio::test]
    async fn speaking_again_interrupts_before_starting() {
        let platform = Arc::new(FakePlatform::new(&["Alex"]));
        platform.set_outcome(PlayOutcome::Hang);
        let adapter = VoiceSynthesisAdapter::new(platform.clone());
        let mut events = adapter.subscribe();

        let first = adapter.speak(utterance("one")).unwrap();
        let second = adapter.speak(utterance("two")).unwrap();
        assert!(adapter.is_playing());

        let received: Vec<_> = (0..3).map(|_| events.try_recv().unwrap()).collect();
        assert_eq!(
            received,
            vec![
                UtteranceEvent::Started { id: first },
                UtteranceEvent::Ended {
                    id: first,
                    interrupted: true
                },
                UtteranceEvent::Started { id: second },
            ]
        );

        assert!(adapter.stop());
        assert_eq!(
            events.try_recv().unwrap(),
            UtteranceEvent::Ended {
                id: second,
                interrupted: true
            }
        );
        assert!(!adapter.stop());
    }

    #[tokio::test]
    async fn platform_failure_becomes_failed_event() {
        let platform = Arc::new(FakePlatform::new(&["Alex"]));
        platform.set_outcome(PlayOutcome::Fail("audio device lost".into()));
        let adapter = VoiceSynthesisAdapter::new(platform);
        let mut events = adapter.subscribe();

        let id = adapter.speak(utterance("hello")).unwrap();

        assert_eq!(
            wait_for_terminal(&mut events, id).await,
            Some(UtteranceEvent::Failed {
                id,
                reason: "audio device lost".into()
            })
        );
        assert!(!adapter.is_playing());
    }

    #[tokio::test]
    async fn empty_text_and_missing_engine_are_rejected_before_playback() {
        let platform = Arc::new(FakePlatform::new(&["Alex"]));
        let adapter = VoiceSynthesisAdapter::new(platform.clone());
        assert_eq!(
            adapter.speak(utterance("   ")),
            Err(SpeechError::EmptyInput)
        );
        assert!(platform.played.lock().unwrap().is_empty());

        let adapter = VoiceSynthesisAdapter::new(Arc::new(FakePlatform::unavailable()));
        assert!(matches!(
            adapter.speak(utterance("hello")),
            Err(SpeechError::Unsupported(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn voices_are_polled_until_they_appear() {
        let mut platform = FakePlatform::new(&["Alex", "Samantha"]);
        platform.empty_listings = 2;
        let platform = Arc::new(platform);
        let adapter = VoiceSynthesisAdapter::new(platform.clone());

        let voices = adapter.load_voices().await;

        assert_eq!(voices.len(), 2);
        assert_eq!(platform.list_calls.load(Ordering::SeqCst), 3);
        assert_eq!(adapter.voices(), voices);
    }

    #[tokio::test(start_paused = true)]
    async fn polling_gives_up_after_the_last_delay() {
        let mut platform = FakePlatform::new(&["Alex"]);
        platform.empty_listings = usize::MAX;
        let platform = Arc::new(platform);
        let adapter = VoiceSynthesisAdapter::new(platform.clone());

        assert!(adapter.load_voices().await.is_empty());
        assert_eq!(
            platform.list_calls.load(Ordering::SeqCst),
            VOICE_POLL_DELAYS_MS.len()
        );
    }

    #[tokio::test]
    async fn ready_signal_replaces_polling() {
        let mut platform = FakePlatform::new(&["Alex"]);
        platform.ready = VoicesReady::Signalled;
        let platform = Arc::new(platform);
        let adapter = VoiceSynthesisAdapter::new(platform.clone());

        assert_eq!(adapter.load_voices().await.len(), 1);
        assert_eq!(platform.list_calls.load(Ordering::SeqCst), 1);
    }
}
