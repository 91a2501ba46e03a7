//! Canonical event union for all cross-adapter events.
//!
//! Events are serialized with a `type` tag so SSE clients can switch on it:
//!
//! ```json
//! { "type": "request_created", "request": { "id": 3, "status": "completed", ... } }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionStatus, Session, SpeechRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A request was submitted to the ledger.
    RequestCreated { request: SpeechRequest },

    /// A request's status or result fields changed.
    RequestStatusChanged { request: SpeechRequest },

    /// A session record was inserted or refreshed.
    SessionUpdated { session: Session },

    /// The simulated live connection changed state.
    ConnectionStatusChanged { status: ConnectionStatus },
}

impl AppEvent {
    pub const fn request_created(request: SpeechRequest) -> Self {
        Self::RequestCreated { request }
    }

    pub const fn request_status_changed(request: SpeechRequest) -> Self {
        Self::RequestStatusChanged { request }
    }

    pub const fn session_updated(session: Session) -> Self {
        Self::SessionUpdated { session }
    }

    pub const fn connection_status_changed(status: ConnectionStatus) -> Self {
        Self::ConnectionStatusChanged { status }
    }

    /// The wire `type` tag of this event.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::RequestCreated { .. } => "request_created",
            Self::RequestStatusChanged { .. } => "request_status_changed",
            Self::SessionUpdated { .. } => "session_updated",
            Self::ConnectionStatusChanged { .. } => "connection_status_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_name_matches_serialized_tag() {
        let event = AppEvent::connection_status_changed(ConnectionStatus::Connected);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.event_name());
        assert_eq!(json["status"], "connected");
    }
}
