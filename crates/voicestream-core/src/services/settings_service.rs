//! Settings service - orchestrates settings operations.

use crate::ports::{CoreError, SettingsRepository};
use crate::settings::{Settings, SettingsUpdate, validate_settings};
use std::sync::Arc;

/// Service for settings operations.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Get current settings.
    pub async fn get(&self) -> Result<Settings, CoreError> {
        self.repo.load().await.map_err(CoreError::from)
    }

    /// Update settings with partial changes.
    pub async fn update(&self, update: SettingsUpdate) -> Result<Settings, CoreError> {
        let mut current = self.repo.load().await.map_err(CoreError::from)?;
        current.merge(&update);
        validate_settings(&current)?;
        self.repo.save(&current).await.map_err(CoreError::from)?;
        tracing::info!(?update, "Settings updated");
        Ok(current)
    }

    /// Restore every setting to its default.
    pub async fn reset(&self) -> Result<Settings, CoreError> {
        let defaults = Settings::with_defaults();
        self.repo.save(&defaults).await.map_err(CoreError::from)?;
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VoiceId;
    use crate::services::test_support::MockSettingsRepo;

    #[tokio::test]
    async fn test_get_default_settings() {
        let service = SettingsService::new(Arc::new(MockSettingsRepo::new()));

        let settings = service.get().await.unwrap();
        assert_eq!(settings.default_voice, Some(VoiceId::Alloy));
    }

    #[tokio::test]
    async fn test_update_settings() {
        let service = SettingsService::new(Arc::new(MockSettingsRepo::new()));

        let update = SettingsUpdate {
            default_speed: Some(Some(1.5)),
            live_mode: Some(Some(false)),
            ..Default::default()
        };
        let updated = service.update(update).await.unwrap();
        assert_eq!(updated.default_speed, Some(1.5));

        // Verify persisted
        let fetched = service.get().await.unwrap();
        assert_eq!(fetched.live_mode, Some(false));
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_saved() {
        let service = SettingsService::new(Arc::new(MockSettingsRepo::new()));

        let update = SettingsUpdate {
            default_speed: Some(Some(3.0)),
            ..Default::default()
        };
        assert!(matches!(
            service.update(update).await,
            Err(CoreError::Settings(_))
        ));
        assert_eq!(service.get().await.unwrap().default_speed, Some(1.0));
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let service = SettingsService::new(Arc::new(MockSettingsRepo::new()));
        service
            .update(SettingsUpdate {
                server_port: Some(Some(9000)),
                ..Default::default()
            })
            .await
            .unwrap();

        let reset = service.reset().await.unwrap();
        assert_eq!(reset, Settings::with_defaults());
    }
}
