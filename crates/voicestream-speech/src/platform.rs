//! [`SpeechPlatform`] implementation over a host speech binary.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::OnceCell;

use voicestream_core::{PlatformVoice, SpeechError, SpeechPlatform, Utterance, VoicesReady};

use crate::engine::Engine;
use crate::error::EngineError;

/// Speech playback through `espeak-ng`, `espeak` or `say`.
///
/// The voice list is read once and cached; the first successful read is the
/// readiness signal reported by [`voices_ready`](SpeechPlatform::voices_ready).
pub struct SystemSpeechPlatform {
    engine: Option<(Engine, PathBuf)>,
    voices: OnceCell<Vec<PlatformVoice>>,
}

impl SystemSpeechPlatform {
    /// Use the first engine found on `PATH`, or none.
    pub fn detect() -> Self {
        let engine = Engine::detect();
        match &engine {
            Some((engine, path)) => {
                tracing::debug!(engine = engine.binary(), path = %path.display(), "Speech engine found");
            }
            None => tracing::warn!("{}", EngineError::NotFound),
        }
        Self {
            engine,
            voices: OnceCell::new(),
        }
    }

    pub fn with_engine(engine: Engine, binary: impl Into<PathBuf>) -> Self {
        Self {
            engine: Some((engine, binary.into())),
            voices: OnceCell::new(),
        }
    }

    /// A platform with no engine. Every call reports `Unsupported`.
    pub fn unavailable() -> Self {
        Self {
            engine: None,
            voices: OnceCell::new(),
        }
    }

    pub fn engine(&self) -> Option<Engine> {
        self.engine.as_ref().map(|(engine, _)| *engine)
    }

    fn require_engine(&self) -> Result<(Engine, &PathBuf), EngineError> {
        self.engine
            .as_ref()
            .map(|(engine, path)| (*engine, path))
            .ok_or(EngineError::NotFound)
    }

    async fn read_voices(&self) -> Result<Vec<PlatformVoice>, EngineError> {
        let (engine, binary) = self.require_engine()?;

        let output = Command::new(binary)
            .args(engine.list_voices_args())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                engine: engine.binary(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Exited {
                engine: engine.binary(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(engine.parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn run(&self, utterance: &Utterance) -> Result<(), EngineError> {
        let (engine, binary) = self.require_engine()?;

        let mut child = Command::new(binary)
            .args(engine.speak_args(utterance))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                engine: engine.binary(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(utterance.text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(EngineError::Exited {
                engine: engine.binary(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl SpeechPlatform for SystemSpeechPlatform {
    fn name(&self) -> &str {
        self.engine().map_or("none", Engine::binary)
    }

    fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    async fn list_voices(&self) -> Result<Vec<PlatformVoice>, SpeechError> {
        let voices = self
            .voices
            .get_or_try_init(|| self.read_voices())
            .await
            .map_err(SpeechError::from)?;
        Ok(voices.clone())
    }

    async fn voices_ready(&self) -> VoicesReady {
        match self.voices.get_or_try_init(|| self.read_voices()).await {
            Ok(_) => VoicesReady::Signalled,
            Err(e) => {
                tracing::warn!(error = %e, "Voice list unavailable, falling back to polling");
                VoicesReady::Unsupported
            }
        }
    }

    async fn play(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        tracing::debug!(
            engine = self.name(),
            chars = utterance.text.chars().count(),
            voice = utterance.voice.as_deref().unwrap_or("default"),
            "Playing utterance"
        );
        self.run(utterance).await.map_err(SpeechError::from)
    }
}
