//! `history` command: list, replay or clear the local speak history.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use voicestream_core::Notifier;

use crate::bootstrap::CliContext;
use crate::commands::HistoryCommand;
use crate::error::CliError;
use crate::handlers::speak::{play_to_end, report};
use crate::notifier::TerminalNotifier;
use crate::presentation::print_history;

pub async fn execute(ctx: &CliContext, command: HistoryCommand) -> Result<()> {
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::new());
    let mut controller = ctx.speech_controller(notifier).await?;

    match command {
        HistoryCommand::List => {
            let history = controller.history();
            print_history(history.items(), history.total_requests(), Utc::now());
        }
        HistoryCommand::Replay { id } => {
            let mut events = controller.adapter().subscribe();
            let Some(spoken) = controller.replay(id).await.map_err(CliError::from)? else {
                return Err(CliError::Arguments(format!("No history item with id {id}")).into());
            };
            report(&spoken);
            play_to_end(&controller, &mut events, &spoken).await?;
        }
        HistoryCommand::Clear => {
            let count = controller.history().items().len();
            controller.clear_history().await;
            println!("✓ Cleared {count} history item(s).");
        }
    }
    Ok(())
}
