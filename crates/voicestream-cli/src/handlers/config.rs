//! `config` command: show, update or reset persisted settings.

use anyhow::Result;
use voicestream_core::settings::parse_voice;
use voicestream_core::{Settings, SettingsUpdate};

use crate::bootstrap::CliContext;
use crate::commands::ConfigCommand;
use crate::error::CliError;
use crate::utils::input::prompt_confirmation;

pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = ctx.settings.get().await?;
            print_settings(&settings)?;
        }
        ConfigCommand::Set {
            voice,
            speed,
            pitch,
            live,
            port,
            user,
            clear_user,
        } => {
            let update = build_update(voice.as_deref(), speed, pitch, live, port, user, clear_user)?;
            if is_empty(&update) {
                println!("Nothing to change. See `voicestream config set --help`.");
                return Ok(());
            }
            let settings = ctx.settings.update(update).await.map_err(CliError::from)?;
            println!("✓ Settings updated.");
            print_settings(&settings)?;
        }
        ConfigCommand::Reset { force } => {
            if !force && !prompt_confirmation("Reset all settings to defaults?")? {
                println!("Cancelled.");
                return Ok(());
            }
            let settings = ctx.settings.reset().await?;
            println!("✓ Settings reset to defaults.");
            print_settings(&settings)?;
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    println!();
    println!("Effective values:");
    println!("  voice:     {}", settings.effective_voice());
    println!("  speed:     {}", settings.effective_speed());
    println!("  pitch:     {}", settings.effective_pitch());
    println!("  live mode: {}", if settings.effective_live_mode() { "on" } else { "off" });
    println!("  port:      {}", settings.effective_server_port());
    println!("  user:      {}", settings.user_id.as_deref().unwrap_or("(none)"));
    Ok(())
}

fn build_update(
    voice: Option<&str>,
    speed: Option<f64>,
    pitch: Option<f64>,
    live: Option<bool>,
    port: Option<u16>,
    user: Option<String>,
    clear_user: bool,
) -> Result<SettingsUpdate, CliError> {
    let default_voice = voice
        .map(|name| parse_voice(name).map_err(|e| CliError::Arguments(e.to_string())))
        .transpose()?;

    Ok(SettingsUpdate {
        default_voice: default_voice.map(Some),
        default_speed: speed.map(Some),
        default_pitch: pitch.map(Some),
        live_mode: live.map(Some),
        server_port: port.map(Some),
        user_id: if clear_user { Some(None) } else { user.map(Some) },
    })
}

const fn is_empty(update: &SettingsUpdate) -> bool {
    update.default_voice.is_none()
        && update.default_speed.is_none()
        && update.default_pitch.is_none()
        && update.live_mode.is_none()
        && update.server_port.is_none()
        && update.user_id.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicestream_core::VoiceId;

    #[test]
    fn flags_become_set_operations() {
        let update = build_update(Some("echo"), Some(1.5), None, Some(false), None, None, false)
            .unwrap();
        assert_eq!(update.default_voice, Some(Some(VoiceId::Echo)));
        assert_eq!(update.default_speed, Some(Some(1.5)));
        assert_eq!(update.live_mode, Some(Some(false)));
        assert!(update.default_pitch.is_none());
        assert!(update.user_id.is_none());
    }

    #[test]
    fn clear_user_resets_the_owner() {
        let update = build_update(None, None, None, None, None, None, true).unwrap();
        assert_eq!(update.user_id, Some(None));
        assert!(!is_empty(&update));
        assert!(is_empty(&build_update(None, None, None, None, None, None, false).unwrap()));
    }

    #[test]
    fn unknown_voice_is_an_argument_error() {
        let err = build_update(Some("robot"), None, None, None, None, None, false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
