//! CLI bootstrap - the composition root.
//!
//! The only place where infrastructure is wired together for the CLI:
//! - Database pool and repositories (via voicestream-db)
//! - Host speech engine (via voicestream-speech)
//! - Core services (via voicestream-core)
//!
//! Command handlers receive the composed `CliContext` and delegate to it.

use std::sync::Arc;

use anyhow::Result;
use voicestream_core::paths::database_path;
use voicestream_core::{
    AppEventEmitter, HistoryCache, LedgerService, NoopEmitter, Notifier, Repos, SessionService,
    Settings, SettingsService, SpeechController, SpeechPlatform, VoiceSynthesisAdapter,
};
use voicestream_core::services::SpeechPreferences;
use voicestream_db::{CoreFactory, setup_database};
use voicestream_speech::SystemSpeechPlatform;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Owner id given on the command line; wins over the stored setting.
    pub user: Option<String>,
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub repos: Repos,
    pub ledger: Arc<LedgerService>,
    pub sessions: Arc<SessionService>,
    pub settings: SettingsService,
    pub platform: Arc<dyn SpeechPlatform>,
    user: Option<String>,
}

impl CliContext {
    /// Compose services over existing repositories and a speech platform.
    ///
    /// The CLI has no event subscribers, so services get a `NoopEmitter`.
    pub fn from_parts(
        repos: Repos,
        platform: Arc<dyn SpeechPlatform>,
        config: CliConfig,
    ) -> Self {
        let emitter: Arc<dyn AppEventEmitter> = Arc::new(NoopEmitter::new());
        Self {
            ledger: Arc::new(LedgerService::new(repos.requests.clone(), emitter.clone())),
            sessions: Arc::new(SessionService::new(repos.sessions.clone(), emitter)),
            settings: SettingsService::new(repos.settings.clone()),
            repos,
            platform,
            user: config.user.filter(|u| !u.trim().is_empty()),
        }
    }

    /// Owner for ledger writes: the `--user` flag, else the stored setting.
    pub fn owner_for(&self, settings: &Settings) -> Option<String> {
        self.user
            .clone()
            .or_else(|| settings.user_id.clone())
            .filter(|u| !u.trim().is_empty())
    }

    pub async fn owner(&self) -> Result<Option<String>> {
        let settings = self.settings.get().await?;
        Ok(self.owner_for(&settings))
    }

    /// Build the speech session: load the platform's voices, restore the
    /// history cache, apply stored preferences and attach the ledger when an
    /// owner is known.
    pub async fn speech_controller(&self, notifier: Arc<dyn Notifier>) -> Result<SpeechController> {
        let settings = self.settings.get().await?;

        let adapter = Arc::new(VoiceSynthesisAdapter::new(Arc::clone(&self.platform)));
        adapter.load_voices().await;

        let history = HistoryCache::restore(self.repos.history.clone()).await;

        let mut controller =
            SpeechController::new(adapter, history, notifier, settings.effective_live_mode())
                .with_preferences(SpeechPreferences::from_settings(&settings));

        if let Some(owner) = self.owner_for(&settings) {
            controller = controller.with_ledger(Arc::clone(&self.ledger), owner);
        }

        Ok(controller)
    }
}

/// Bootstrap the CLI application against the on-disk database and the host
/// speech engine.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = database_path()?;
    let pool = setup_database(&db_path).await?;
    let repos = CoreFactory::build_repos(pool);

    let platform: Arc<dyn SpeechPlatform> = Arc::new(SystemSpeechPlatform::detect());
    tracing::debug!(engine = platform.name(), "CLI bootstrap complete");

    Ok(CliContext::from_parts(repos, platform, config))
}
