//! Voices, utterances and the abstract-to-platform voice mapping.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Longest text accepted for a single utterance, in characters.
pub const MAX_TEXT_CHARS: usize = 500;

/// Playback rate bounds offered to users.
pub const SPEED_RANGE: RangeInclusive<f64> = 0.5..=2.0;

/// Rate adjustment increment.
pub const SPEED_STEP: f64 = 0.1;

/// Pitch bounds offered to users.
pub const PITCH_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// A voice reported by the speech platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformVoice {
    pub name: String,
    pub language: String,
    pub is_default: bool,
}

impl PlatformVoice {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            is_default: false,
        }
    }
}

/// One unit of requested speech playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Platform voice name; `None` lets the platform choose.
    pub voice: Option<String>,
    pub rate: f64,
    pub pitch: f64,
}

/// Abstract voice identifiers stored on ledger requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceId {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl VoiceId {
    pub const ALL: [Self; 6] = [
        Self::Alloy,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Shimmer,
    ];

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "alloy" => Some(Self::Alloy),
            "echo" => Some(Self::Echo),
            "fable" => Some(Self::Fable),
            "onyx" => Some(Self::Onyx),
            "nova" => Some(Self::Nova),
            "shimmer" => Some(Self::Shimmer),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Alloy => "Alloy",
            Self::Echo => "Echo",
            Self::Fable => "Fable",
            Self::Onyx => "Onyx",
            Self::Nova => "Nova",
            Self::Shimmer => "Shimmer",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Alloy => "Neutral and balanced",
            Self::Echo => "Clear and crisp",
            Self::Fable => "Expressive and warm",
            Self::Onyx => "Deep and authoritative",
            Self::Nova => "Bright and energetic",
            Self::Shimmer => "Soft and gentle",
        }
    }

    /// Platform voice names tried in order when mapping this id.
    #[must_use]
    pub const fn preferred_platform_voices(&self) -> &'static [&'static str] {
        match self {
            Self::Alloy => &["Google US English", "Microsoft David", "Alex"],
            Self::Echo => &["Google UK English Female", "Microsoft Zira", "Victoria"],
            Self::Fable => &["Google UK English Male", "Microsoft Mark", "Daniel"],
            Self::Onyx => &["Microsoft David", "Alex", "Google US English"],
            Self::Nova => &["Microsoft Zira", "Samantha", "Google US English Female"],
            Self::Shimmer => &["Samantha", "Microsoft Zira", "Google US English Female"],
        }
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pick the platform voice for an abstract voice id.
///
/// Returns the first platform voice whose name contains the first
/// space-delimited token of any preferred name (case-sensitive). Falls back
/// to the first available voice, so `None` only for an empty list.
pub fn select_platform_voice(id: VoiceId, voices: &[PlatformVoice]) -> Option<&PlatformVoice> {
    let tokens: Vec<&str> = id
        .preferred_platform_voices()
        .iter()
        .filter_map(|preferred| preferred.split(' ').next())
        .collect();

    voices
        .iter()
        .find(|voice| tokens.iter().any(|token| voice.name.contains(token)))
        .or_else(|| voices.first())
}

/// Clip text to [`MAX_TEXT_CHARS`] characters.
pub fn clip_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices(names: &[&str]) -> Vec<PlatformVoice> {
        names.iter().map(|n| PlatformVoice::new(*n, "en-US")).collect()
    }

    #[test]
    fn selects_by_first_token_of_preferred_name() {
        let list = voices(&["Karen", "Google Deutsch", "Microsoft Zira Desktop"]);
        // Platform order wins: "Google US English Female" reduces to "Google".
        let chosen = select_platform_voice(VoiceId::Nova, &list).unwrap();
        assert_eq!(chosen.name, "Google Deutsch");

        let chosen = select_platform_voice(VoiceId::Echo, &list[2..]).unwrap();
        assert_eq!(chosen.name, "Microsoft Zira Desktop");
    }

    #[test]
    fn match_is_case_sensitive() {
        let list = voices(&["Karen", "samantha"]);
        let chosen = select_platform_voice(VoiceId::Shimmer, &list).unwrap();
        assert_eq!(chosen.name, "Karen");
    }

    #[test]
    fn falls_back_to_first_voice_or_none() {
        let list = voices(&["Karen", "Moira"]);
        assert_eq!(
            select_platform_voice(VoiceId::Fable, &list).unwrap().name,
            "Karen"
        );
        assert!(select_platform_voice(VoiceId::Fable, &[]).is_none());
    }

    #[test]
    fn voice_ids_parse_their_own_names() {
        for id in VoiceId::ALL {
            assert_eq!(VoiceId::parse(id.as_str()), Some(id));
        }
        assert_eq!(VoiceId::parse("Alloy"), None);
    }

    #[test]
    fn clip_text_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_TEXT_CHARS + 20);
        assert_eq!(clip_text(&long).chars().count(), MAX_TEXT_CHARS);
        assert_eq!(clip_text("short"), "short");
    }
}
