//! Filesystem locations used by VoiceStream.
//!
//! - [`data_root`] - base directory, overridable with `VOICESTREAM_DATA_DIR`
//! - [`database_path`] - the SQLite ledger/history database
//! - [`env_file_path`] - optional `.env` loaded at startup

mod database;
mod error;
mod platform;

pub use database::{DATABASE_FILE_NAME, database_path};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, env_file_path, resolve_data_root};
