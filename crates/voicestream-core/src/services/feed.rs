//! Change detection over successive ledger listings.

use crate::domain::{RequestId, RequestStatus, SpeechRequest};
use crate::ports::Notification;

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedChange {
    /// A request not present in the previous listing.
    New(SpeechRequest),
    /// A known request whose status differs from the previous listing.
    StatusChanged {
        id: RequestId,
        previous: RequestStatus,
        current: RequestStatus,
    },
}

impl FeedChange {
    /// Notification shown for this change, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::New(request) => Some(Notification::success(
                "New speech request processed",
                format!("\"{}\"", preview(&request.text)),
            )),
            Self::StatusChanged {
                current: RequestStatus::Completed,
                ..
            } => Some(Notification::info("Speech synthesis completed", "")),
            Self::StatusChanged { .. } => None,
        }
    }
}

/// Remembers the previous listing and reports what changed.
#[derive(Debug, Default)]
pub struct RequestFeed {
    previous: Vec<SpeechRequest>,
}

impl RequestFeed {
    /// A feed with no history: the first listing reports every request as new.
    pub fn new() -> Self {
        Self::default()
    }

    /// A feed primed with a listing, so only later changes are reported.
    pub const fn seeded(current: Vec<SpeechRequest>) -> Self {
        Self { previous: current }
    }

    pub fn apply(&mut self, current: Vec<SpeechRequest>) -> Vec<FeedChange> {
        let mut changes = Vec::new();

        for request in &current {
            match self.previous.iter().find(|p| p.id == request.id) {
                None => changes.push(FeedChange::New(request.clone())),
                Some(previous) if previous.status != request.status => {
                    changes.push(FeedChange::StatusChanged {
                        id: request.id,
                        previous: previous.status,
                        current: request.status,
                    });
                }
                Some(_) => {}
            }
        }

        self.previous = current;
        changes
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: i64, status: RequestStatus, text: &str) -> SpeechRequest {
        SpeechRequest {
            id: RequestId(id),
            owner: Some("u1".into()),
            text: text.into(),
            status,
            voice: Some("alloy".into()),
            speed: Some(1.0),
            audio_url: None,
            error_message: None,
            created_at: id,
        }
    }

    #[test]
    fn reports_new_requests_and_status_changes() {
        let mut feed = RequestFeed::seeded(vec![request(1, RequestStatus::Processing, "a")]);

        let changes = feed.apply(vec![
            request(2, RequestStatus::Completed, "b"),
            request(1, RequestStatus::Completed, "a"),
        ]);

        assert_eq!(
            changes,
            vec![
                FeedChange::New(request(2, RequestStatus::Completed, "b")),
                FeedChange::StatusChanged {
                    id: RequestId(1),
                    previous: RequestStatus::Processing,
                    current: RequestStatus::Completed,
                },
            ]
        );
        assert!(feed.apply(vec![
            request(2, RequestStatus::Completed, "b"),
            request(1, RequestStatus::Completed, "a"),
        ])
        .is_empty());
    }

    #[test]
    fn unseeded_feed_reports_everything_once() {
        let mut feed = RequestFeed::new();
        let listing = vec![request(1, RequestStatus::Completed, "a")];
        assert_eq!(feed.apply(listing.clone()).len(), 1);
        assert!(feed.apply(listing).is_empty());
    }

    #[test]
    fn new_request_notice_previews_fifty_characters() {
        let long = "x".repeat(80);
        let notice = FeedChange::New(request(1, RequestStatus::Completed, &long))
            .notification()
            .unwrap();
        assert_eq!(notice.description, format!("\"{}...\"", "x".repeat(50)));

        let short = FeedChange::New(request(1, RequestStatus::Completed, "hi"))
            .notification()
            .unwrap();
        assert_eq!(short.description, "\"hi\"");
    }

    #[test]
    fn only_completion_is_announced() {
        let errored = FeedChange::StatusChanged {
            id: RequestId(1),
            previous: RequestStatus::Processing,
            current: RequestStatus::Error,
        };
        assert!(errored.notification().is_none());
    }
}
