//! `quick-texts` command.

use voicestream_core::QUICK_TEXTS;

use crate::presentation::truncate_string;

pub fn execute() {
    for (position, sample) in QUICK_TEXTS.iter().enumerate() {
        println!("{}. {}", position + 1, sample.title);
        println!("   {}", truncate_string(sample.text, 100));
    }
    println!();
    println!("Use `/quick <n>` in interactive mode to load one.");
}
