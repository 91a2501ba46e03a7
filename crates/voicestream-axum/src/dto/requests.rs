//! Request ledger and session DTOs.

use serde::{Deserialize, Serialize};
use voicestream_core::{NewSpeechRequest, RequestId, RequestStatus, StatusUpdate};

/// Body of `POST /api/requests`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestBody {
    pub text: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub speed: Option<f64>,
}

impl From<SubmitRequestBody> for NewSpeechRequest {
    fn from(body: SubmitRequestBody) -> Self {
        Self {
            text: body.text,
            owner: body.user_id,
            voice: body.voice,
            speed: body.speed,
        }
    }
}

/// Response of `POST /api/requests`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatedDto {
    pub id: RequestId,
}

/// Query string of `GET /api/requests`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequestsQuery {
    pub user_id: Option<String>,
}

/// Body of `PATCH /api/requests/{id}/status`.
///
/// Omitted fields keep their stored value; an empty string clears them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateBody {
    pub status: RequestStatus,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl From<StatusUpdateBody> for StatusUpdate {
    fn from(body: StatusUpdateBody) -> Self {
        Self {
            status: body.status,
            audio_url: body.audio_url,
            error_message: body.error_message,
        }
    }
}

/// Body of `POST /api/sessions/ping`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}
