//! CLI-specific error types and mappings.

use thiserror::Error;
use voicestream_core::{CoreError, SpeechError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Core(String),

    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    /// No usable speech engine.
    #[error("Speech unavailable: {0}")]
    Unavailable(String),
}

impl CliError {
    /// Exit code following sysexits.h where a category fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Database(_) => 73,    // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Speech(speech_err) => speech_err.into(),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
        }
    }
}

impl From<SpeechError> for CliError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::EmptyInput => Self::Arguments(err.to_string()),
            SpeechError::Unsupported(_) => Self::Unavailable(err.to_string()),
            SpeechError::Platform(msg) => Self::Core(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error returned from `main`'s dispatch.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(core) = err.downcast_ref::<CoreError>() {
        return match core {
            CoreError::Repository(_) => 73,
            CoreError::Settings(_) => 78,
            CoreError::Validation(_) | CoreError::Speech(SpeechError::EmptyInput) => 2,
            CoreError::Speech(SpeechError::Unsupported(_)) => 69,
            _ => 1,
        };
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicestream_core::RepositoryError;

    #[test]
    fn core_errors_map_to_sysexits() {
        let db: CliError = CoreError::Repository(RepositoryError::Storage("locked".into())).into();
        assert_eq!(db.exit_code(), 73);

        let usage: CliError = CoreError::Validation("bad".into()).into();
        assert_eq!(usage.exit_code(), 2);

        let missing: CliError = SpeechError::Unsupported("none".into()).into();
        assert_eq!(missing.exit_code(), 69);
    }

    #[test]
    fn anyhow_errors_keep_their_exit_code() {
        let err = anyhow::Error::new(CliError::Config("x".into()));
        assert_eq!(exit_code_for(&err), 78);

        let err = anyhow::Error::new(CoreError::Speech(SpeechError::EmptyInput));
        assert_eq!(exit_code_for(&err), 2);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), 1);
    }
}
