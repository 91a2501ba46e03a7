//! Terminal rendering of user-facing notifications.

use std::io::Write;

use voicestream_core::{Notification, NotificationKind, Notifier};

/// Writes notifications to stderr as single lines, so they interleave with
/// the prompt without corrupting stdout output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub const fn new() -> Self {
        Self
    }
}

pub fn render(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Info => "i",
        NotificationKind::Success => "✓",
        NotificationKind::Warning => "!",
        NotificationKind::Error => "✗",
    };
    if notification.description.is_empty() {
        format!("[{marker}] {}", notification.title)
    } else {
        format!("[{marker}] {}: {}", notification.title, notification.description)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", render(&notification));
    }
}
