//! Data directory resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that relocates all VoiceStream data.
pub const DATA_DIR_ENV: &str = "VOICESTREAM_DATA_DIR";

/// Get the root directory for VoiceStream data.
///
/// Resolution order:
/// 1. `VOICESTREAM_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/voicestream`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root(env::var(DATA_DIR_ENV).ok().as_deref())?;

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Pick the data root from an optional override without touching the disk.
pub fn resolve_data_root(override_dir: Option<&str>) -> Result<PathBuf, PathError> {
    match override_dir {
        Some(dir) if dir.trim().is_empty() => Err(PathError::BlankOverride),
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("voicestream")),
    }
}

/// Path of the `.env` file read at startup.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}
