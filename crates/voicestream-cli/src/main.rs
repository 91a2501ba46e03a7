//! CLI entry point.
//!
//! Parses arguments, wires the context through `bootstrap` and dispatches
//! to the command handlers.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use voicestream_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(CliConfig { user: cli.user }).await?;

    match command {
        Commands::Web {
            port,
            static_dir,
            cors_origins,
        } => handlers::web::execute(&ctx, port, static_dir, cors_origins).await?,
        Commands::Speak(args) => handlers::speak::execute(&ctx, args).await?,
        Commands::Voices { platform } => handlers::voices::execute(&ctx, platform).await?,
        Commands::QuickTexts => handlers::quick_texts::execute(),
        Commands::History { command } => handlers::history::execute(&ctx, command).await?,
        Commands::Requests { command } => handlers::requests::execute(&ctx, command).await?,
        Commands::Interactive => handlers::interactive::execute(&ctx).await?,
        Commands::Config { command } => handlers::config::execute(&ctx, command).await?,
        Commands::Paths => handlers::paths::execute(&ctx)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Environment first so RUST_LOG and VOICESTREAM_* from .env apply
    dotenvy::dotenv().ok();
    if let Ok(path) = voicestream_core::paths::env_file_path() {
        dotenvy::from_path(path).ok();
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code_for(&e));
    }
}
