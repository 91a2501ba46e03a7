//! `requests` command: read the request ledger.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use voicestream_core::services::{LiveGate, RequestFeed};
use voicestream_core::{Notifier, RequestId};

use crate::bootstrap::CliContext;
use crate::commands::RequestsCommand;
use crate::error::CliError;
use crate::notifier::TerminalNotifier;
use crate::presentation::{print_request_detail, print_requests};

const NO_OWNER_HINT: &str =
    "No user set. Pass --user <id> or run `voicestream config set --user <id>`.";

pub async fn execute(ctx: &CliContext, command: RequestsCommand) -> Result<()> {
    match command {
        RequestsCommand::List => {
            let Some(owner) = ctx.owner().await? else {
                println!("{NO_OWNER_HINT}");
                return Ok(());
            };
            let requests = ctx.ledger.list_recent(Some(&owner)).await?;
            print_requests(&requests);
        }
        RequestsCommand::Show { id } => {
            let request = ctx
                .ledger
                .get(RequestId(id))
                .await?
                .ok_or_else(|| CliError::Arguments(format!("Request {id} not found")))?;
            print_request_detail(&request);
        }
        RequestsCommand::Watch { interval } => watch(ctx, interval).await?,
    }
    Ok(())
}

/// Poll the owner's listing and report new requests and status changes
/// until Ctrl-C.
async fn watch(ctx: &CliContext, interval_secs: u64) -> Result<()> {
    let settings = ctx.settings.get().await?;
    let Some(owner) = ctx.owner_for(&settings) else {
        println!("{NO_OWNER_HINT}");
        return Ok(());
    };
    if interval_secs == 0 {
        return Err(CliError::Arguments("Interval must be at least 1 second".into()).into());
    }

    let notifier = LiveGate::new(
        Arc::new(TerminalNotifier::new()),
        settings.effective_live_mode(),
    );
    let mut feed = RequestFeed::seeded(ctx.ledger.list_recent(Some(&owner)).await?);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.tick().await;

    println!("Watching requests for {owner} (Ctrl-C to stop)");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = match ctx.ledger.list_recent(Some(&owner)).await {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::warn!(error = %e, "Ledger poll failed");
                        continue;
                    }
                };
                for change in feed.apply(current) {
                    if let Some(notification) = change.notification() {
                        notifier.notify(notification);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
