//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Text-to-speech from the terminal, with local history and an optional
/// request ledger.
#[derive(Parser)]
#[command(name = "voicestream")]
#[command(about = "Speak text aloud and keep a history of what was said")]
#[command(version)]
pub struct Cli {
    /// Owner id for the request ledger and session tracking
    /// (overrides the `user_id` setting)
    #[arg(short = 'u', long = "user", global = true, env = "VOICESTREAM_USER")]
    pub user: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ConfigCommand, HistoryCommand, RequestsCommand};
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["voicestream", "--verbose", "--user", "u1", "voices"]);
        assert!(cli.verbose);
        assert_eq!(cli.user.as_deref(), Some("u1"));
        assert!(matches!(cli.command, Some(Commands::Voices { platform: false })));
    }

    #[test]
    fn speak_joins_words_and_parses_options() {
        let cli = Cli::try_parse_from([
            "voicestream",
            "speak",
            "--voice",
            "nova",
            "--speed",
            "1.5",
            "hello",
            "world",
        ])
        .unwrap();
        let Some(Commands::Speak(args)) = cli.command else {
            panic!("expected speak");
        };
        assert_eq!(args.text, vec!["hello", "world"]);
        assert_eq!(args.voice.as_deref(), Some("nova"));
        assert_eq!(args.speed, Some(1.5));
        assert_eq!(args.pitch, None);
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::try_parse_from(["voicestream", "history", "replay", "1700000000000"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                command: HistoryCommand::Replay { id: 1_700_000_000_000 }
            })
        ));

        let cli = Cli::try_parse_from(["voicestream", "requests", "show", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Requests {
                command: RequestsCommand::Show { id: 7 }
            })
        ));

        let cli = Cli::try_parse_from(["voicestream", "config", "reset", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommand::Reset { force: true }
            })
        ));
    }

    #[test]
    fn speak_requires_text() {
        assert!(Cli::try_parse_from(["voicestream", "speak"]).is_err());
    }
}
