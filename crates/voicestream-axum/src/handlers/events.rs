use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;

use crate::state::AppState;

/// `GET /api/events`: request, session and connection events as they happen.
///
/// Each SSE event is named after the event type (`request_created`, ...)
/// and carries the JSON-encoded [`voicestream_core::AppEvent`].
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    Arc::clone(&state.sse).subscribe()
}
