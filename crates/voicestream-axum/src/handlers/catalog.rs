//! Static catalog handlers: voice ids and sample texts.

use axum::Json;

use voicestream_core::{QUICK_TEXTS, QuickText, VoiceId};

use crate::dto::VoiceDto;

pub async fn voices() -> Json<Vec<VoiceDto>> {
    Json(VoiceId::ALL.into_iter().map(VoiceDto::from).collect())
}

pub async fn quick_texts() -> Json<Vec<QuickText>> {
    Json(QUICK_TEXTS.to_vec())
}
