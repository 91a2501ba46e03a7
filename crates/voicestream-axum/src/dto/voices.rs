use serde::Serialize;
use voicestream_core::VoiceId;

/// One entry of `GET /api/voices`.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceDto {
    pub id: VoiceId,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<VoiceId> for VoiceDto {
    fn from(id: VoiceId) -> Self {
        Self {
            id,
            label: id.label(),
            description: id.description(),
        }
    }
}
