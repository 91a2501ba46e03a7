//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No process or engine implementation details
//! - Traits are minimal and CRUD-focused for repositories

pub mod event_emitter;
pub mod history_store;
pub mod notifier;
pub mod request_ledger;
pub mod session_repository;
pub mod settings_repository;
pub mod speech_platform;

use std::sync::Arc;
use thiserror::Error;

pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use history_store::HistoryStore;
pub use notifier::{NoopNotifier, Notification, NotificationKind, Notifier};
pub use request_ledger::RequestLedgerRepository;
pub use session_repository::SessionRepository;
pub use settings_repository::SettingsRepository;
pub use speech_platform::{SpeechError, SpeechPlatform, VoicesReady};

/// Container for all repository trait objects.
///
/// Lives in the core so services can be composed without depending on the
/// database crate.
#[derive(Clone)]
pub struct Repos {
    /// Durable speech request ledger.
    pub requests: Arc<dyn RequestLedgerRepository>,
    /// Per-user session records.
    pub sessions: Arc<dyn SessionRepository>,
    /// Local history storage keys.
    pub history: Arc<dyn HistoryStore>,
    /// Application settings.
    pub settings: Arc<dyn SettingsRepository>,
}

impl Repos {
    pub fn new(
        requests: Arc<dyn RequestLedgerRepository>,
        sessions: Arc<dyn SessionRepository>,
        history: Arc<dyn HistoryStore>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            requests,
            sessions,
            history,
            settings,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The database rejected a write (CHECK, NOT NULL, UNIQUE or foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Speech playback failed.
    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
