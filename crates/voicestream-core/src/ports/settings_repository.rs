use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::Settings;

/// Whole-document storage for [`Settings`].
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored settings, or [`Settings::with_defaults`] when nothing was saved yet.
    async fn load(&self) -> Result<Settings, RepositoryError>;

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError>;
}
