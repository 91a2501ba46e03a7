//! Session activity handlers.

use axum::Json;
use axum::extract::State;

use voicestream_core::Session;

use crate::dto::PingBody;
use crate::error::HttpError;
use crate::state::AppState;

/// Upsert the caller's session. Returns `null` without a `userId`.
pub async fn ping(
    State(state): State<AppState>,
    Json(body): Json<PingBody>,
) -> Result<Json<Option<Session>>, HttpError> {
    Ok(Json(
        state
            .sessions
            .ping(body.user_id.as_deref(), body.is_active)
            .await?,
    ))
}
