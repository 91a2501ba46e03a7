//! Speech engine error types.

use voicestream_core::SpeechError;

/// Errors raised while driving the host speech engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// None of the supported binaries is on `PATH`.
    #[error("No speech engine found (tried espeak-ng, espeak, say)")]
    NotFound,

    /// The engine process could not be started.
    #[error("Failed to start {engine}: {source}")]
    Spawn {
        engine: &'static str,
        source: std::io::Error,
    },

    /// Writing text to or reading output from the engine failed.
    #[error("IO error talking to speech engine: {0}")]
    Io(#[from] std::io::Error),

    /// The engine exited unsuccessfully.
    #[error("{engine} exited with {status}: {stderr}")]
    Exited {
        engine: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

impl From<EngineError> for SpeechError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound => Self::Unsupported(EngineError::NotFound.to_string()),
            other => Self::Platform(other.to_string()),
        }
    }
}
