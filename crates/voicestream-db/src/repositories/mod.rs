//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_history_store;
mod sqlite_request_ledger_repository;
mod sqlite_session_repository;
mod sqlite_settings_repository;

pub use sqlite_history_store::SqliteHistoryStore;
pub use sqlite_request_ledger_repository::SqliteRequestLedgerRepository;
pub use sqlite_session_repository::SqliteSessionRepository;
pub use sqlite_settings_repository::SqliteSettingsRepository;
