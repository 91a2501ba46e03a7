//! `paths` command: print resolved locations for diagnostics.

use anyhow::Result;
use voicestream_core::paths::{DATA_DIR_ENV, data_root, database_path, env_file_path};

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("data_root = {}", data_root()?.display());
    println!("database  = {}", database_path()?.display());
    println!("env_file  = {}", env_file_path()?.display());
    println!(
        "override  = {}",
        std::env::var(DATA_DIR_ENV).map_or_else(|_| format!("(set {DATA_DIR_ENV} to change)"), |v| v)
    );
    println!("engine    = {}", ctx.platform.name());
    Ok(())
}
