//! `voices` command.

use anyhow::Result;
use voicestream_core::domain::select_platform_voice;
use voicestream_core::{VoiceId, VoiceSynthesisAdapter};

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

pub async fn execute(ctx: &CliContext, platform: bool) -> Result<()> {
    let adapter = VoiceSynthesisAdapter::new(ctx.platform.clone());
    let voices = adapter.load_voices().await;

    if platform {
        if !adapter.is_supported() {
            println!("No speech engine found (install espeak-ng or espeak).");
            return Ok(());
        }
        println!("Voices from {} ({}):", adapter.platform_name(), voices.len());
        println!("{:<32} {:<12} DEFAULT", "NAME", "LANGUAGE");
        print_separator(52);
        for voice in &voices {
            println!(
                "{:<32} {:<12} {}",
                truncate_string(&voice.name, 32),
                voice.language,
                if voice.is_default { "yes" } else { "" }
            );
        }
        return Ok(());
    }

    println!("{:<8} {:<24} ENGINE VOICE", "ID", "DESCRIPTION");
    print_separator(60);
    for id in VoiceId::ALL {
        let mapped = select_platform_voice(id, &voices)
            .map_or_else(|| "(engine default)".to_string(), |v| v.name.clone());
        println!("{:<8} {:<24} {mapped}", id.as_str(), id.description());
    }
    Ok(())
}
