#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    ConnectionStatus, HistoryItem, HistorySnapshot, NewSpeechRequest, PlatformVoice, QUICK_TEXTS,
    QuickText, RequestId, RequestStatus, Session, SpeechRequest, StatusUpdate, StoredHistory,
    Utterance, VoiceId,
};
pub use events::AppEvent;
pub use ports::{
    AppEventEmitter, CoreError, HistoryStore, NoopEmitter, NoopNotifier, Notification,
    NotificationKind, Notifier, Repos, RepositoryError, RequestLedgerRepository,
    SessionRepository, SettingsRepository, SpeechError, SpeechPlatform, VoicesReady,
};
pub use services::{
    HistoryCache, LedgerService, SessionService, SettingsService, SpeechController,
    VoiceSynthesisAdapter,
};
pub use settings::{
    DEFAULT_SERVER_PORT, Settings, SettingsError, SettingsUpdate, validate_settings,
};
pub use paths::{PathError, data_root, database_path};
