//! Interactive speech session.
//!
//! Plain lines are spoken. Lines starting with `/` are commands. Playback
//! runs in the background so `/stop` and new text take effect immediately.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use voicestream_core::services::{
    ConnectionMonitor, ConnectionMonitorConfig, SESSION_PING_INTERVAL, SessionHeartbeat,
};
use voicestream_core::{
    AppEvent, AppEventEmitter, ConnectionStatus, Notifier, SpeechController, VoiceId,
};

use crate::bootstrap::CliContext;
use crate::handlers::speak::parse_voice_choice;
use crate::notifier::TerminalNotifier;
use crate::presentation::print_history;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Enter on an empty line.
    Empty,
    Speak(String),
    Command(ReplCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Stop,
    Replay(i64),
    Clear,
    History,
    /// `None` toggles.
    Live(Option<bool>),
    Voice(String),
    Speed(f64),
    Pitch(f64),
    Voices,
    Quick(usize),
    Status,
    Help,
    Quit,
    /// A known command with bad arguments; holds the usage line.
    Usage(&'static str),
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Input::Speak(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let command = match name.as_str() {
        "stop" => ReplCommand::Stop,
        "replay" => arg
            .parse()
            .map_or(ReplCommand::Usage("/replay <history id>"), ReplCommand::Replay),
        "clear" => ReplCommand::Clear,
        "history" => ReplCommand::History,
        "live" => match arg {
            "" => ReplCommand::Live(None),
            "on" => ReplCommand::Live(Some(true)),
            "off" => ReplCommand::Live(Some(false)),
            _ => ReplCommand::Usage("/live [on|off]"),
        },
        "voice" if !arg.is_empty() => ReplCommand::Voice(arg.to_string()),
        "voice" => ReplCommand::Usage("/voice <id|engine voice|default>"),
        "speed" => arg
            .parse()
            .map_or(ReplCommand::Usage("/speed <0.5-2.0>"), ReplCommand::Speed),
        "pitch" => arg
            .parse()
            .map_or(ReplCommand::Usage("/pitch <0.0-2.0>"), ReplCommand::Pitch),
        "voices" => ReplCommand::Voices,
        "quick" => arg
            .parse()
            .map_or(ReplCommand::Usage("/quick <1-5>"), ReplCommand::Quick),
        "status" => ReplCommand::Status,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(name),
    };
    Input::Command(command)
}

const HELP: &str = "\
Type text and press Enter to speak it.
  /stop              stop playback
  /history           show recent items
  /replay <id>       speak a history item again
  /clear             clear history
  /quick <n>         load a sample text (Enter speaks it)
  /voice <v>         voice id, engine voice name or `default`
  /speed <x>         speech rate 0.5-2.0
  /pitch <x>         pitch 0.0-2.0
  /voices            list voice ids
  /live [on|off]     toggle live notifications
  /status            show current settings
  /quit              leave";

/// Prints connection status changes on stderr.
#[derive(Clone)]
struct ConnectionPrinter;

impl AppEventEmitter for ConnectionPrinter {
    fn emit(&self, event: AppEvent) {
        if let AppEvent::ConnectionStatusChanged { status } = event {
            eprintln!("[connection] {status}");
        }
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

struct Repl {
    controller: SpeechController,
    monitor: Option<ConnectionMonitor>,
    /// Quick text waiting for an empty Enter.
    pending: Option<String>,
}

impl Repl {
    fn connection_status(&self) -> ConnectionStatus {
        self.monitor
            .as_ref()
            .map_or(ConnectionStatus::Disconnected, ConnectionMonitor::status)
    }

    fn set_live(&mut self, live: bool) {
        self.controller.set_live(live);
        match (live, self.monitor.take()) {
            (true, None) => self.monitor = Some(start_monitor()),
            (true, Some(monitor)) => self.monitor = Some(monitor),
            (false, Some(monitor)) => monitor.stop(),
            (false, None) => {}
        }
    }

    async fn speak(&mut self, text: &str) {
        match self.controller.speak(text).await {
            Ok(spoken) => {
                if let Some(id) = spoken.ledger_id {
                    tracing::debug!(request = %id, "Recorded request");
                }
            }
            Err(e) => tracing::debug!(error = %e, "Speak failed"),
        }
    }

    /// Returns `false` when the session should end.
    async fn run(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Stop => {
                if !self.controller.stop() {
                    println!("Nothing is playing.");
                }
            }
            ReplCommand::Replay(id) => match self.controller.replay(id).await {
                Ok(Some(_)) => {}
                Ok(None) => println!("No history item with id {id}."),
                Err(e) => tracing::debug!(error = %e, "Replay failed"),
            },
            ReplCommand::Clear => {
                self.controller.clear_history().await;
                println!("History cleared.");
            }
            ReplCommand::History => {
                let history = self.controller.history();
                print_history(history.items(), history.total_requests(), Utc::now());
            }
            ReplCommand::Live(requested) => {
                let live = requested.unwrap_or(!self.controller.is_live());
                self.set_live(live);
            }
            ReplCommand::Voice(value) => {
                self.controller.select_voice(parse_voice_choice(&value));
                match self.controller.resolved_voice() {
                    Some(voice) => println!("Voice: {} ({})", voice.name, voice.language),
                    None => println!("Voice: engine default"),
                }
            }
            ReplCommand::Speed(speed) => match self.controller.set_speed(speed) {
                Ok(()) => println!("Speed: {speed:.1}x"),
                Err(e) => println!("{e}"),
            },
            ReplCommand::Pitch(pitch) => match self.controller.set_pitch(pitch) {
                Ok(()) => println!("Pitch: {pitch:.1}"),
                Err(e) => println!("{e}"),
            },
            ReplCommand::Voices => {
                for id in VoiceId::ALL {
                    println!("  {:<8} {}", id.as_str(), id.description());
                }
            }
            ReplCommand::Quick(position) => match self.controller.load_quick_text(position) {
                Some(sample) => {
                    println!("{}: {}", sample.title, sample.text);
                    println!("Press Enter to speak it.");
                    self.pending = Some(sample.text.to_string());
                }
                None => println!("Pick a sample between 1 and 5."),
            },
            ReplCommand::Status => self.print_status(),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => return false,
            ReplCommand::Usage(usage) => println!("Usage: {usage}"),
            ReplCommand::Unknown(name) => println!("Unknown command /{name}. Try /help."),
        }
        true
    }

    fn print_status(&self) {
        let prefs = self.controller.preferences();
        let voice = self
            .controller
            .resolved_voice()
            .map_or_else(|| "engine default".to_string(), |v| v.name);
        println!("engine:     {}", self.controller.adapter().platform_name());
        println!("voice:      {voice}");
        println!("speed:      {:.1}x", prefs.speed);
        println!("pitch:      {:.1}", prefs.pitch);
        println!("live:       {}", if self.controller.is_live() { "on" } else { "off" });
        println!("connection: {}", self.connection_status());
        println!("playing:    {}", self.controller.adapter().is_playing());
        println!("owner:      {}", self.controller.owner().unwrap_or("(none)"));
        println!("requests:   {}", self.controller.history().total_requests());
    }
}

fn start_monitor() -> ConnectionMonitor {
    ConnectionMonitor::start(ConnectionMonitorConfig::default(), Arc::new(ConnectionPrinter))
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

pub async fn execute(ctx: &CliContext) -> Result<()> {
    run_session(ctx, BufReader::new(tokio::io::stdin())).await
}

/// Drive the session from `input` until EOF, `/quit` or a read failure.
/// Playback, the monitor and the heartbeat are always shut down before a
/// read error is returned.
async fn run_session<R>(ctx: &CliContext, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::new());
    let controller = ctx.speech_controller(notifier).await?;

    let heartbeat = controller
        .owner()
        .map(|owner| SessionHeartbeat::start(ctx.sessions.clone(), owner, SESSION_PING_INTERVAL));
    let monitor = controller.is_live().then(start_monitor);

    let mut session = Repl {
        controller,
        monitor,
        pending: None,
    };

    println!("VoiceStream interactive mode. /help for commands, /quit to leave.");
    if !session.controller.adapter().is_supported() {
        println!("No speech engine found; text will be rejected until one is installed.");
    }

    let mut lines = input.lines();
    let mut failure = None;
    loop {
        prompt();
        let line = tokio::select! {
            line = lines.next_line() => match line {
                Ok(line) => line,
                Err(e) => {
                    failure = Some(e);
                    None
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                if session.controller.stop() {
                    continue;
                }
                None
            }
        };
        let Some(line) = line else { break };

        match parse_input(&line) {
            Input::Empty => {
                if let Some(text) = session.pending.take() {
                    session.speak(&text).await;
                }
            }
            Input::Speak(text) => {
                session.pending = None;
                session.speak(&text).await;
            }
            Input::Command(command) => {
                if !session.run(command).await {
                    break;
                }
            }
        }
    }

    session.controller.stop();
    if let Some(monitor) = session.monitor.take() {
        monitor.stop();
    }
    if let Some(heartbeat) = heartbeat {
        if let Err(e) = heartbeat.stop().await {
            tracing::warn!(error = %e, "Could not mark session inactive");
        }
    }
    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
