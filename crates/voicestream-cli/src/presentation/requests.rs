//! Request ledger output.

use chrono::{DateTime, Utc};
use voicestream_core::SpeechRequest;

use super::tables::{format_optional, print_separator, truncate_string};

fn created(request: &SpeechRequest) -> String {
    DateTime::<Utc>::from_timestamp_millis(request.created_at).map_or_else(
        || request.created_at.to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

pub fn print_requests(requests: &[SpeechRequest]) {
    if requests.is_empty() {
        println!("No requests recorded.");
        return;
    }

    println!(
        "{:<6} {:<10} {:<8} {:>5} {:<19}  {}",
        "ID", "STATUS", "VOICE", "SPEED", "CREATED", "TEXT"
    );
    print_separator(100);
    for request in requests {
        println!(
            "{:<6} {:<10} {:<8} {:>5} {:<19}  {}",
            request.id.0,
            request.status.as_str(),
            format_optional(request.voice.as_ref(), "-"),
            format_optional(request.speed.as_ref(), "-"),
            created(request),
            truncate_string(&request.text, 40)
        );
    }
}

pub fn print_request_detail(request: &SpeechRequest) {
    println!("Request {}", request.id);
    println!("  owner:         {}", format_optional(request.owner.as_ref(), "-"));
    println!("  status:        {}", request.status);
    println!("  voice:         {}", format_optional(request.voice.as_ref(), "-"));
    println!("  speed:         {}", format_optional(request.speed.as_ref(), "-"));
    println!("  created:       {}", created(request));
    println!("  audio url:     {}", format_optional(request.audio_url.as_ref(), "-"));
    println!(
        "  error message: {}",
        format_optional(request.error_message.as_ref(), "-")
    );
    println!("  text:          {}", request.text);
}
