//! `web` command: run the HTTP API.

use anyhow::Result;
use voicestream_axum::{AxumContext, ServerConfig, create_broadcaster, serve};

use crate::bootstrap::CliContext;

pub async fn execute(
    ctx: &CliContext,
    port: Option<u16>,
    static_dir: Option<String>,
    cors_origins: Vec<String>,
) -> Result<()> {
    let settings = ctx.settings.get().await?;

    let mut config = ServerConfig::with_defaults();
    config.port = port.unwrap_or_else(|| settings.effective_server_port());
    if let Some(dir) = static_dir {
        config = config.with_static_dir(dir);
    }
    if !cors_origins.is_empty() {
        config = config.with_allowed_origins(cors_origins);
    }

    let server_ctx = AxumContext::from_repos(&ctx.repos, create_broadcaster());
    println!("VoiceStream API listening on http://localhost:{}/api", config.port);
    serve(server_ctx, &config).await
}
