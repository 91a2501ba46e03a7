use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// The platform reports no local data directory and no override is set.
    #[error("Cannot determine a data directory; set {} instead", super::DATA_DIR_ENV)]
    NoDataDir,

    #[error("Failed to create data directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    #[error("{} is set but blank", super::DATA_DIR_ENV)]
    BlankOverride,
}
