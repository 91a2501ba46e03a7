//! Application services.
//!
//! Services are thin orchestrators over ports. They hold `Arc<dyn Port>`
//! handles, apply domain rules, and emit events; they never touch storage
//! or the speech engine directly.

pub mod connection;
pub mod controller;
pub mod feed;
pub mod history_cache;
pub mod ledger;
pub mod session;
pub mod settings_service;
pub mod synthesis;

#[cfg(test)]
pub(crate) mod test_support;

pub use connection::{ConnectionMonitor, ConnectionMonitorConfig};
pub use controller::{
    LiveGate, SpeechController, SpeechPreferences, SpokenRequest, VoiceChoice,
    utterance_notification,
};
pub use feed::{FeedChange, RequestFeed};
pub use history_cache::HistoryCache;
pub use ledger::LedgerService;
pub use session::{SESSION_PING_INTERVAL, SessionHeartbeat, SessionService};
pub use settings_service::SettingsService;
pub use synthesis::{
    UtteranceEvent, UtteranceId, VOICE_POLL_DELAYS_MS, VoiceSynthesisAdapter, wait_for_terminal,
};
