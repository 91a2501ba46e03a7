//! Supported speech engines: detection, argument mapping and voice list parsing.
//!
//! Everything here is pure except [`Engine::detect`], so the mapping rules
//! are testable without any engine installed.

use std::path::PathBuf;

use voicestream_core::{PlatformVoice, Utterance};

/// Words per minute at rate 1.0. Both espeak and `say` default to this.
pub const BASE_WORDS_PER_MINUTE: f64 = 175.0;

/// espeak pitch units per unit of utterance pitch (espeak's default is 50).
const ESPEAK_PITCH_SCALE: f64 = 50.0;
const ESPEAK_PITCH_MAX: f64 = 99.0;

/// A host text-to-speech binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    EspeakNg,
    Espeak,
    Say,
}

impl Engine {
    /// Detection order. The first binary found on `PATH` wins.
    pub const PREFERENCE: [Self; 3] = [Self::EspeakNg, Self::Espeak, Self::Say];

    pub const fn binary(self) -> &'static str {
        match self {
            Self::EspeakNg => "espeak-ng",
            Self::Espeak => "espeak",
            Self::Say => "say",
        }
    }

    /// Find the first supported engine on `PATH`.
    pub fn detect() -> Option<(Self, PathBuf)> {
        Self::PREFERENCE.into_iter().find_map(|engine| {
            which::which(engine.binary())
                .ok()
                .map(|path| (engine, path))
        })
    }

    /// Arguments that print the voice list.
    pub fn list_voices_args(self) -> &'static [&'static str] {
        match self {
            Self::EspeakNg | Self::Espeak => &["--voices"],
            Self::Say => &["-v", "?"],
        }
    }

    /// Arguments for speaking an utterance. The text itself goes to stdin.
    pub fn speak_args(self, utterance: &Utterance) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(voice) = utterance.voice.as_deref().filter(|v| !v.is_empty()) {
            args.push("-v".to_string());
            args.push(voice.to_string());
        }

        match self {
            Self::EspeakNg | Self::Espeak => {
                args.push("-s".to_string());
                args.push(words_per_minute(utterance.rate).to_string());
                args.push("-p".to_string());
                args.push(espeak_pitch(utterance.pitch).to_string());
                args.push("--stdin".to_string());
            }
            // `say` has no pitch flag.
            Self::Say => {
                args.push("-r".to_string());
                args.push(words_per_minute(utterance.rate).to_string());
                args.push("-f".to_string());
                args.push("-".to_string());
            }
        }

        args
    }

    /// Parse the output of [`list_voices_args`](Self::list_voices_args).
    pub fn parse_voices(self, output: &str) -> Vec<PlatformVoice> {
        match self {
            Self::EspeakNg | Self::Espeak => parse_espeak_voices(output),
            Self::Say => parse_say_voices(output),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn words_per_minute(rate: f64) -> u32 {
    let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
    (rate * BASE_WORDS_PER_MINUTE).round() as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn espeak_pitch(pitch: f64) -> u32 {
    let pitch = if pitch.is_finite() { pitch } else { 1.0 };
    (pitch * ESPEAK_PITCH_SCALE)
        .round()
        .clamp(0.0, ESPEAK_PITCH_MAX) as u32
}

/// `espeak --voices` prints a header then one row per voice:
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File          Other Languages
///  5  en-us           --/M      English_(America)  gmw/en-US     (en 10)
/// ```
fn parse_espeak_voices(output: &str) -> Vec<PlatformVoice> {
    output
        .lines()
        .filter(|line| !line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_, language, _, name, ..] => Some(PlatformVoice::new(*name, *language)),
                _ => None,
            }
        })
        .collect()
}

/// `say -v ?` prints `<name> <locale> # <sample sentence>`; names may contain spaces.
fn parse_say_voices(output: &str) -> Vec<PlatformVoice> {
    output
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim();
            let (name, language) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(PlatformVoice::new(name, language.replace('_', "-")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(voice: Option<&str>, rate: f64, pitch: f64) -> Utterance {
        Utterance {
            text: "hi".into(),
            voice: voice.map(str::to_string),
            rate,
            pitch,
        }
    }

    #[test]
    fn espeak_voice_listing_is_parsed() {
        let output = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 5  en-us           --/M      English_(America)  gmw/en-US            (en 10)
";
        let voices = Engine::EspeakNg.parse_voices(output);
        assert_eq!(
            voices,
            vec![
                PlatformVoice::new("Afrikaans", "af"),
                PlatformVoice::new("English_(America)", "en-us"),
            ]
        );
    }

    #[test]
    fn say_voice_listing_keeps_multi_word_names() {
        let output = "\
Alex                en_US    # Most people recognize me by my voice.
Bad News            en_US    # The light you see at the end of the tunnel.
Karen               en_AU    # Hello, my name is Karen.
";
        let voices = Engine::Say.parse_voices(output);
        let names: Vec<&str> = voices.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Alex", "Bad News", "Karen"]);
        assert_eq!(voices[2].language, "en-AU");
    }

    #[test]
    fn blank_and_garbage_lines_are_skipped() {
        assert!(Engine::Espeak.parse_voices("\n  \nshort line\n").is_empty());
        assert!(Engine::Say.parse_voices("\n# only comment\n").is_empty());
    }

    #[test]
    fn espeak_arguments_map_rate_and_pitch() {
        let args = Engine::EspeakNg.speak_args(&utterance(Some("en-us"), 1.5, 1.2));
        assert_eq!(
            args,
            vec!["-v", "en-us", "-s", "263", "-p", "60", "--stdin"]
        );
    }

    #[test]
    fn espeak_pitch_is_clamped() {
        assert_eq!(espeak_pitch(0.0), 0);
        assert_eq!(espeak_pitch(2.0), 99);
        assert_eq!(espeak_pitch(f64::NAN), 50);
    }

    #[test]
    fn say_arguments_skip_missing_voice() {
        let args = Engine::Say.speak_args(&utterance(None, 0.5, 1.0));
        assert_eq!(args, vec!["-r", "88", "-f", "-"]);
    }

    #[test]
    fn invalid_rate_falls_back_to_default_speed() {
        assert_eq!(words_per_minute(0.0), 175);
        assert_eq!(words_per_minute(-1.0), 175);
        assert_eq!(words_per_minute(2.0), 350);
    }
}
