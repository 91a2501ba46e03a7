//! Local history table.

use chrono::{DateTime, Utc};
use voicestream_core::HistoryItem;

use super::tables::{print_separator, truncate_string};

const TEXT_WIDTH: usize = 40;

pub fn print_history(items: &[HistoryItem], total_requests: u64, now: DateTime<Utc>) {
    if items.is_empty() {
        println!("No speech history yet.");
    } else {
        println!(
            "{:<15} {:<10} {:<20} {:>5} {:>5}  {}",
            "ID", "WHEN", "VOICE", "SPEED", "PITCH", "TEXT"
        );
        print_separator(110);
        for item in items {
            println!(
                "{:<15} {:<10} {:<20} {:>5.1} {:>5.1}  {}",
                item.id,
                item.age(now),
                truncate_string(&item.voice, 20),
                item.speed,
                item.pitch,
                truncate_string(&item.text, TEXT_WIDTH)
            );
        }
    }
    println!();
    println!("Total requests: {total_requests}");
}
