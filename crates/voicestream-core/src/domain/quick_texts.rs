//! Sample texts offered for one-click playback.

use serde::Serialize;

/// A titled sample text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickText {
    pub title: &'static str,
    pub text: &'static str,
}

pub const QUICK_TEXTS: [QuickText; 5] = [
    QuickText {
        title: "Welcome Message",
        text: "Welcome to VoiceStream, the ultimate text-to-speech platform. Experience natural-sounding voices with real-time processing.",
    },
    QuickText {
        title: "News Headline",
        text: "Breaking: Scientists discover a new method for converting text to speech with unprecedented clarity and naturalness.",
    },
    QuickText {
        title: "Product Demo",
        text: "Transform any written content into professional audio with our advanced text-to-speech technology. Choose from multiple voices and adjust speed to suit your needs.",
    },
    QuickText {
        title: "Educational Content",
        text: "Did you know that text-to-speech technology helps millions of people with reading difficulties access written content more easily?",
    },
    QuickText {
        title: "Poetry Sample",
        text: "Roses are red, violets are blue, VoiceStream makes voices that sound just like you!",
    },
];

/// Look up a quick text by its 1-based position.
pub fn quick_text(position: usize) -> Option<&'static QuickText> {
    position.checked_sub(1).and_then(|index| QUICK_TEXTS.get(index))
}
