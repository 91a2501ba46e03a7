//! Settings domain types and validation.
//!
//! These are the user preferences that survive restarts: default voice and
//! playback parameters, live-mode notifications, and the web server port.

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_SPEED, PITCH_RANGE, SPEED_RANGE, VoiceId};

/// Default port for the HTTP server.
pub const DEFAULT_SERVER_PORT: u16 = 8787;

/// Default pitch multiplier.
pub const DEFAULT_PITCH: f64 = 1.0;

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Voice used when none is chosen explicitly.
    pub default_voice: Option<VoiceId>,
    /// Playback rate (0.5-2.0).
    pub default_speed: Option<f64>,
    /// Pitch multiplier (0.0-2.0).
    pub default_pitch: Option<f64>,
    /// Whether non-error notifications are shown.
    pub live_mode: Option<bool>,
    /// Port for `voicestream web`.
    pub server_port: Option<u16>,
    /// Owner recorded on ledger requests and session pings.
    pub user_id: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            default_voice: Some(VoiceId::Alloy),
            default_speed: Some(DEFAULT_SPEED),
            default_pitch: Some(DEFAULT_PITCH),
            live_mode: Some(true),
            server_port: Some(DEFAULT_SERVER_PORT),
            user_id: None,
        }
    }

    #[must_use]
    pub const fn effective_voice(&self) -> VoiceId {
        match self.default_voice {
            Some(voice) => voice,
            None => VoiceId::Alloy,
        }
    }

    #[must_use]
    pub const fn effective_speed(&self) -> f64 {
        match self.default_speed {
            Some(speed) => speed,
            None => DEFAULT_SPEED,
        }
    }

    #[must_use]
    pub const fn effective_pitch(&self) -> f64 {
        match self.default_pitch {
            Some(pitch) => pitch,
            None => DEFAULT_PITCH,
        }
    }

    #[must_use]
    pub const fn effective_live_mode(&self) -> bool {
        match self.live_mode {
            Some(live) => live,
            None => true,
        }
    }

    #[must_use]
    pub const fn effective_server_port(&self) -> u16 {
        match self.server_port {
            Some(port) => port,
            None => DEFAULT_SERVER_PORT,
        }
    }

    /// Merge an update into these settings, only touching fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(voice) = other.default_voice {
            self.default_voice = voice;
        }
        if let Some(speed) = other.default_speed {
            self.default_speed = speed;
        }
        if let Some(pitch) = other.default_pitch {
            self.default_pitch = pitch;
        }
        if let Some(live) = other.live_mode {
            self.live_mode = live;
        }
        if let Some(port) = other.server_port {
            self.server_port = port;
        }
        if let Some(ref user_id) = other.user_id {
            self.user_id.clone_from(user_id);
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset the field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub default_voice: Option<Option<VoiceId>>,
    pub default_speed: Option<Option<f64>>,
    pub default_pitch: Option<Option<f64>>,
    pub live_mode: Option<Option<bool>>,
    pub server_port: Option<Option<u16>>,
    pub user_id: Option<Option<String>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Speed must be between 0.5 and 2.0, got {0}")]
    InvalidSpeed(f64),

    #[error("Pitch must be between 0.0 and 2.0, got {0}")]
    InvalidPitch(f64),

    #[error("Unknown voice '{0}' (expected alloy, echo, fable, onyx, nova or shimmer)")]
    InvalidVoice(String),

    #[error("Port should be >= 1024 (privileged ports require root), got {0}")]
    InvalidPort(u16),

    #[error("User id cannot be empty")]
    EmptyUserId,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(speed) = settings.default_speed {
        if !SPEED_RANGE.contains(&speed) {
            return Err(SettingsError::InvalidSpeed(speed));
        }
    }

    if let Some(pitch) = settings.default_pitch {
        if !PITCH_RANGE.contains(&pitch) {
            return Err(SettingsError::InvalidPitch(pitch));
        }
    }

    if let Some(port) = settings.server_port {
        if port < 1024 {
            return Err(SettingsError::InvalidPort(port));
        }
    }

    if settings
        .user_id
        .as_ref()
        .is_some_and(|id| id.trim().is_empty())
    {
        return Err(SettingsError::EmptyUserId);
    }

    Ok(())
}

/// Parse a voice name for settings input.
pub fn parse_voice(name: &str) -> Result<VoiceId, SettingsError> {
    VoiceId::parse(&name.trim().to_lowercase())
        .ok_or_else(|| SettingsError::InvalidVoice(name.to_string()))
}
