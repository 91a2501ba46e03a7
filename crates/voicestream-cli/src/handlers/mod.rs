//! Command handlers.
//!
//! Each handler takes the composed `CliContext`, turns CLI arguments into
//! service calls and formats the result for the terminal. Playback, history
//! and ledger rules live in `voicestream-core`.

pub mod config;
pub mod history;
pub mod interactive;
pub mod paths;
pub mod quick_texts;
pub mod requests;
pub mod speak;
pub mod voices;
pub mod web;
