//! Speech request ledger types.
//!
//! A `SpeechRequest` is the durable record of one submitted text. It is
//! independent of the local history cache and is only listed per owner.

use serde::{Deserialize, Serialize};

/// Maximum number of requests returned by a ledger listing.
pub const LEDGER_LIST_LIMIT: usize = 50;

/// Voice stored on a request when the caller does not name one.
pub const DEFAULT_VOICE: &str = "alloy";

/// Speed stored on a request when the caller does not supply one.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Opaque ledger identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub i64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processing status of a speech request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl RequestStatus {
    /// Parse a status from its lowercase name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored speech request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    pub id: RequestId,
    /// Submitting user; requests without an owner are never listed.
    pub owner: Option<String>,
    pub text: String,
    pub status: RequestStatus,
    pub voice: Option<String>,
    pub speed: Option<f64>,
    pub audio_url: Option<String>,
    pub error_message: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Data for submitting a new request.
#[derive(Debug, Clone, Default)]
pub struct NewSpeechRequest {
    pub text: String,
    pub owner: Option<String>,
    pub voice: Option<String>,
    pub speed: Option<f64>,
}

impl NewSpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// Partial status update for an existing request.
///
/// `None` leaves a field untouched. `Some("")` clears it.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: RequestStatus,
    pub audio_url: Option<String>,
    pub error_message: Option<String>,
}

impl StatusUpdate {
    pub const fn new(status: RequestStatus) -> Self {
        Self {
            status,
            audio_url: None,
            error_message: None,
        }
    }

    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Apply this update to an in-memory record.
    pub fn apply(&self, request: &mut SpeechRequest) {
        request.status = self.status;
        patch_field(&mut request.audio_url, self.audio_url.as_deref());
        patch_field(&mut request.error_message, self.error_message.as_deref());
    }
}

fn patch_field(field: &mut Option<String>, value: Option<&str>) {
    match value {
        None => {}
        Some("") => *field = None,
        Some(value) => *field = Some(value.to_string()),
    }
}
