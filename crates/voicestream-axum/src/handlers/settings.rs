//! Settings handlers - application configuration.

use axum::Json;
use axum::extract::State;

use voicestream_core::{Settings, SettingsUpdate};

use crate::error::HttpError;
use crate::state::AppState;

pub async fn get(State(state): State<AppState>) -> Result<Json<Settings>, HttpError> {
    Ok(Json(state.settings.get().await?))
}

/// Merge and validate a partial update.
pub async fn update(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>, HttpError> {
    Ok(Json(state.settings.update(update).await?))
}
