//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together for
//! the web adapter.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use voicestream_core::paths::{data_root, database_path};
use voicestream_core::{
    AppEventEmitter, DEFAULT_SERVER_PORT, LedgerService, Repos, SessionService, SettingsService,
};
use voicestream_db::{CoreFactory, setup_database};

use crate::sse::SseBroadcaster;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Optional directory of static assets served with SPA fallback.
    pub static_dir: Option<PathBuf>,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub fn with_defaults() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            static_dir: None,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Services available to the HTTP handlers.
pub struct AxumContext {
    pub ledger: Arc<LedgerService>,
    pub sessions: Arc<SessionService>,
    pub settings: Arc<SettingsService>,
    /// SSE broadcaster; also the event emitter of the services above.
    pub sse: Arc<SseBroadcaster>,
}

impl AxumContext {
    /// Compose the services over existing repositories.
    pub fn from_repos(repos: &Repos, sse: Arc<SseBroadcaster>) -> Self {
        let emitter = sse.clone() as Arc<dyn AppEventEmitter>;
        Self {
            ledger: Arc::new(LedgerService::new(repos.requests.clone(), emitter.clone())),
            sessions: Arc::new(SessionService::new(repos.sessions.clone(), emitter)),
            settings: Arc::new(SettingsService::new(repos.settings.clone())),
            sse,
        }
    }
}

/// Open the database under the data root and compose the services.
pub async fn bootstrap() -> Result<AxumContext> {
    let db_path = database_path()?;

    tracing::info!(
        target: "voicestream.paths",
        database_path = %db_path.display(),
        data_root = %data_root()?.display(),
        "Axum bootstrap resolved paths"
    );

    let pool = setup_database(&db_path).await?;
    let repos = CoreFactory::build_repos(pool);

    Ok(AxumContext::from_repos(
        &repos,
        Arc::new(SseBroadcaster::with_defaults()),
    ))
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap().await?;
    serve(ctx, &config).await
}

/// Serve an already composed context. Runs until the listener fails.
pub async fn serve(ctx: AxumContext, config: &ServerConfig) -> Result<()> {
    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    if config.static_dir.is_some() {
        info!("VoiceStream web server (with UI) listening on http://{}", addr);
    } else {
        info!("VoiceStream web server (API only) listening on http://{}", addr);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
