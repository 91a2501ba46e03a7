//! Speech platform port.
//!
//! The platform is whatever actually produces audio: a browser engine, a
//! system TTS binary, or a test double. The core only needs to enumerate
//! voices and play one utterance to completion.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PlatformVoice, Utterance};

/// Errors surfaced by speech playback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    /// No speech engine is available on this host.
    #[error("Speech synthesis is not supported: {0}")]
    Unsupported(String),

    /// Nothing to say.
    #[error("Please enter some text to convert to speech")]
    EmptyInput,

    /// The engine reported a runtime failure.
    #[error("{0}")]
    Platform(String),
}

/// Outcome of waiting for the platform's voice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoicesReady {
    /// The platform signalled that voices are loaded.
    Signalled,
    /// The platform has no readiness signal; callers should poll.
    Unsupported,
}

/// Speech synthesis capability of the host.
#[async_trait]
pub trait SpeechPlatform: Send + Sync {
    /// Short engine name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Whether synthesis can run at all.
    fn is_available(&self) -> bool;

    /// Current voice list. May be empty while the platform is still loading.
    async fn list_voices(&self) -> Result<Vec<PlatformVoice>, SpeechError>;

    /// Wait until the voice list is populated.
    ///
    /// Platforms without a readiness signal keep the default, which tells
    /// the caller to fall back to polling.
    async fn voices_ready(&self) -> VoicesReady {
        VoicesReady::Unsupported
    }

    /// Play an utterance and return once playback ends.
    ///
    /// Dropping the returned future must stop playback.
    async fn play(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}
