//! Local history of speak actions.
//!
//! History items mirror what the user heard on this device. They are not
//! reconciled with the request ledger and carry the platform voice's display
//! name rather than an abstract voice id.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of items kept in the history cache.
pub const HISTORY_LIMIT: usize = 10;

/// Storage key holding the serialized item list.
pub const HISTORY_STORAGE_KEY: &str = "voicestream_history";

/// Storage key holding the decimal total-request counter.
pub const TOTAL_REQUESTS_STORAGE_KEY: &str = "voicestream_total_requests";

/// Display name recorded when no platform voice was selected.
pub const DEFAULT_VOICE_LABEL: &str = "Default";

/// Status of a history item. Every recorded item has completed playback
/// submission, so there is only one variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    #[default]
    Completed,
}

/// One entry in the history cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Creation time in epoch milliseconds, bumped when needed to stay unique.
    pub id: i64,
    pub text: String,
    /// Platform voice display name.
    pub voice: String,
    pub speed: f64,
    pub pitch: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: HistoryStatus,
}

impl HistoryItem {
    /// Render the item's age relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> String {
        format_relative(self.timestamp, now)
    }
}

/// Whole-collection snapshot written to durable storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    /// Most-recent-first.
    pub items: Vec<HistoryItem>,
    pub total_requests: u64,
}

/// Raw values of the two storage keys. `None` means the key is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredHistory {
    pub history: Option<String>,
    pub total_requests: Option<String>,
}

impl HistorySnapshot {
    /// Serialize into the two storage values.
    pub fn encode(&self) -> Result<StoredHistory, serde_json::Error> {
        Ok(StoredHistory {
            history: Some(serde_json::to_string(&self.items)?),
            total_requests: Some(self.total_requests.to_string()),
        })
    }

    /// Rebuild a snapshot from stored values.
    ///
    /// Absent keys yield an empty state. The counter keeps its leading
    /// decimal digits (`"12abc"` is 12); no digits or a negative value reads
    /// as zero. A malformed item list is an error.
    pub fn decode(stored: &StoredHistory) -> Result<Self, serde_json::Error> {
        let mut items: Vec<HistoryItem> = match stored.history.as_deref() {
            Some(raw) => serde_json::from_str(raw)?,
            None => Vec::new(),
        };
        items.truncate(HISTORY_LIMIT);

        let total_requests = stored
            .total_requests
            .as_deref()
            .map_or(0, parse_counter);

        Ok(Self {
            items,
            total_requests,
        })
    }
}

/// Leading-integer parse of a stored counter, saturating at `u64::MAX`.
fn parse_counter(raw: &str) -> u64 {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let value = digits.fold(0u64, |acc, d| {
        acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    });
    if negative { 0 } else { value }
}

/// Truncate a timestamp to millisecond precision so it survives storage.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ts.timestamp_millis())
        .single()
        .unwrap_or(ts)
}

/// Format elapsed time as "Just now", "{n}m ago", "{n}h ago" or "{n}d ago".
///
/// Each unit is the floor of the elapsed duration. Timestamps in the future
/// render as "Just now".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", elapsed.num_days())
}
