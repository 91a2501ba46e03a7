//! One-shot `speak` command.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;
use voicestream_core::services::{
    SpokenRequest, UtteranceEvent, VoiceChoice, wait_for_terminal,
};
use voicestream_core::{Notifier, SpeechController, VoiceId};

use crate::bootstrap::CliContext;
use crate::commands::SpeakArgs;
use crate::error::CliError;
use crate::notifier::TerminalNotifier;

/// Interpret a `--voice` value.
///
/// `default` lets the engine choose, a known voice id is mapped onto the
/// engine's voices and anything else is taken as an engine voice name.
pub fn parse_voice_choice(value: &str) -> VoiceChoice {
    let value = value.trim();
    if value.eq_ignore_ascii_case("default") {
        return VoiceChoice::Default;
    }
    VoiceId::parse(&value.to_ascii_lowercase())
        .map_or_else(|| VoiceChoice::Platform(value.to_string()), VoiceChoice::Mapped)
}

pub async fn execute(ctx: &CliContext, args: SpeakArgs) -> Result<()> {
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::new());
    let mut controller = ctx.speech_controller(notifier).await?;

    if let Some(voice) = args.voice.as_deref() {
        controller.select_voice(parse_voice_choice(voice));
    }
    if let Some(speed) = args.speed {
        controller
            .set_speed(speed)
            .map_err(|e| CliError::Arguments(e.to_string()))?;
    }
    if let Some(pitch) = args.pitch {
        controller
            .set_pitch(pitch)
            .map_err(|e| CliError::Arguments(e.to_string()))?;
    }

    let text = args.text.join(" ");
    let mut events = controller.adapter().subscribe();
    let spoken = controller.speak(&text).await.map_err(CliError::from)?;
    report(&spoken);

    play_to_end(&controller, &mut events, &spoken).await
}

pub(crate) fn report(spoken: &SpokenRequest) {
    match spoken.ledger_id {
        Some(id) => println!("Speaking (history {}, request {id})", spoken.history_id),
        None => println!("Speaking (history {})", spoken.history_id),
    }
}

/// Block until the utterance ends, stopping playback on Ctrl-C.
pub(crate) async fn play_to_end(
    controller: &SpeechController,
    events: &mut broadcast::Receiver<UtteranceEvent>,
    spoken: &SpokenRequest,
) -> Result<()> {
    tokio::select! {
        outcome = wait_for_terminal(events, spoken.utterance) => {
            if let Some(UtteranceEvent::Failed { reason, .. }) = outcome {
                return Err(CliError::Core(format!("Playback failed: {reason}")).into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            controller.stop();
            // Let the relay print the interruption before the process exits.
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(200),
                wait_for_terminal(events, spoken.utterance),
            )
            .await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_values_resolve_to_choices() {
        assert_eq!(parse_voice_choice("default"), VoiceChoice::Default);
        assert_eq!(parse_voice_choice("Nova"), VoiceChoice::Mapped(VoiceId::Nova));
        assert_eq!(
            parse_voice_choice("en-us"),
            VoiceChoice::Platform("en-us".to_string())
        );
    }
}
