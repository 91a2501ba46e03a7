//! SSE event broadcaster for real-time event streaming.
//!
//! The broadcaster implements the core `AppEventEmitter` port, so the ledger
//! and session services publish straight to connected web clients.

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::Stream;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use voicestream_core::{AppEvent, AppEventEmitter};

/// Fan-out of `AppEvent`s to every open `/api/events` stream.
///
/// Slow clients may miss events if the buffer overflows.
#[derive(Debug, Clone)]
pub struct SseBroadcaster {
    sender: broadcast::Sender<AppEvent>,
}

impl SseBroadcaster {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Default capacity of 256 events.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// SSE response for a new client, with a keep-alive ping every 30 seconds.
    ///
    /// Each event is named after its `type` tag.
    pub fn subscribe(
        self: Arc<Self>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let receiver = self.sender.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|result| match result {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => Some(Ok(Event::default().event(event.event_name()).data(json))),
                Err(e) => {
                    tracing::warn!("Failed to serialize event: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::debug!("SSE stream error: {}", e);
                None
            }
        });

        Sse::new(stream).keep_alive(
            KeepAlive::new()
                .interval(std::time::Duration::from_secs(30))
                .text("ping"),
        )
    }

    /// Receiver for in-process consumers.
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl AppEventEmitter for SseBroadcaster {
    fn emit(&self, event: AppEvent) {
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

/// Create a shared SSE broadcaster wrapped in Arc.
#[must_use]
pub fn create_broadcaster() -> Arc<SseBroadcaster> {
    Arc::new(SseBroadcaster::with_defaults())
}
