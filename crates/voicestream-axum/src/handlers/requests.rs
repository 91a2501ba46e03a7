//! Request ledger handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use voicestream_core::{RequestId, SpeechRequest};

use crate::dto::{CreatedDto, ListRequestsQuery, StatusUpdateBody, SubmitRequestBody};
use crate::error::HttpError;
use crate::state::AppState;

/// Record a speech request. It is stored as completed immediately.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequestBody>,
) -> Result<(StatusCode, Json<CreatedDto>), HttpError> {
    let id = state.ledger.submit(body.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedDto { id })))
}

/// Up to 50 of the user's requests, newest first. Empty without `userId`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<Vec<SpeechRequest>>, HttpError> {
    Ok(Json(state.ledger.list_recent(query.user_id.as_deref()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SpeechRequest>, HttpError> {
    let id = RequestId(id);
    state
        .ledger
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("speech request {id}")))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdateBody>,
) -> Result<Json<SpeechRequest>, HttpError> {
    Ok(Json(
        state
            .ledger
            .update_status(RequestId(id), body.into())
            .await?,
    ))
}
