//! Commands enum and subcommand definitions.

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (request ledger, sessions, events)
    Web {
        /// Port to listen on (defaults to the `server_port` setting)
        #[arg(short, long, env = "VOICESTREAM_PORT")]
        port: Option<u16>,
        /// Directory of a built web UI to serve alongside the API
        #[arg(long)]
        static_dir: Option<String>,
        /// Allowed CORS origin (repeatable; default allows all)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },

    /// Speak text once and wait for playback to finish
    Speak(SpeakArgs),

    /// List the voice ids, or the host engine's voices with --platform
    Voices {
        /// Show the speech engine's own voices instead
        #[arg(long)]
        platform: bool,
    },

    /// List the built-in sample texts
    QuickTexts,

    /// Inspect or replay the local speak history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Inspect the request ledger
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },

    /// Interactive prompt: type text to hear it, `/help` for commands
    Interactive,

    /// View or change persisted settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show resolved data paths
    Paths,
}

#[derive(Args)]
pub struct SpeakArgs {
    /// Text to speak (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Voice id (alloy, echo, fable, onyx, nova, shimmer) or an engine voice name
    #[arg(long)]
    pub voice: Option<String>,
    /// Speech rate (0.5-2.0)
    #[arg(long)]
    pub speed: Option<f64>,
    /// Pitch (0.0-2.0)
    #[arg(long)]
    pub pitch: Option<f64>,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Show the last ten speak actions
    List,
    /// Speak a history item again
    Replay {
        /// History item id as shown by `history list`
        id: i64,
    },
    /// Remove every history item (the request counter is kept)
    Clear,
}

#[derive(Subcommand)]
pub enum RequestsCommand {
    /// The user's 50 most recent requests
    List,
    /// One request in full
    Show { id: i64 },
    /// Poll the ledger and print new requests and status changes
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "2")]
        interval: u64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show all current settings
    Show,
    /// Update settings
    Set {
        /// Default voice id
        #[arg(long)]
        voice: Option<String>,
        /// Default speech rate (0.5-2.0)
        #[arg(long)]
        speed: Option<f64>,
        /// Default pitch (0.0-2.0)
        #[arg(long)]
        pitch: Option<f64>,
        /// Live notifications on or off
        #[arg(long)]
        live: Option<bool>,
        /// Port for `web` (>= 1024)
        #[arg(long)]
        port: Option<u16>,
        /// Owner id for the request ledger
        #[arg(long, conflicts_with = "clear_user")]
        user: Option<String>,
        /// Forget the stored owner id
        #[arg(long)]
        clear_user: bool,
    },
    /// Reset all settings to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}
