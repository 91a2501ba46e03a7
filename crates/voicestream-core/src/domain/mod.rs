//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, speech engine, HTTP).
//!
//! # Structure
//!
//! - `speech_request` - Ledger records (`SpeechRequest`, `RequestStatus`)
//! - `session` - Per-user activity records
//! - `connection` - Simulated live connection status
//! - `history` - Local history items and their storage snapshot
//! - `voice` - Voice ids, platform voices and utterances
//! - `quick_texts` - Built-in sample texts

pub mod connection;
pub mod history;
pub mod quick_texts;
pub mod session;
pub mod speech_request;
pub mod voice;

pub use connection::ConnectionStatus;
pub use history::{
    DEFAULT_VOICE_LABEL, HISTORY_LIMIT, HISTORY_STORAGE_KEY, HistoryItem, HistorySnapshot,
    HistoryStatus, StoredHistory, TOTAL_REQUESTS_STORAGE_KEY, format_relative,
    truncate_to_millis,
};
pub use quick_texts::{QUICK_TEXTS, QuickText, quick_text};
pub use session::Session;
pub use speech_request::{
    DEFAULT_SPEED, DEFAULT_VOICE, LEDGER_LIST_LIMIT, NewSpeechRequest, RequestId, RequestStatus,
    SpeechRequest, StatusUpdate,
};
pub use voice::{
    MAX_TEXT_CHARS, PITCH_RANGE, PlatformVoice, SPEED_RANGE, SPEED_STEP, Utterance, VoiceId,
    clip_text, select_platform_voice,
};
