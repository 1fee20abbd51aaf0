//! Resolve key presses against a scripted context and print the resulting actions.
//!
//! Interactive mode reads keys from the terminal (Ctrl+Q quits); `--keys`
//! resolves a comma-separated list such as `"down,enter"` and exits.

use anyhow::Context as _;
use clap::Parser;
use crossterm::event::{read as event_read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::path::PathBuf;
use structural_editor::app::{Collaborators, EditorSession};
use structural_editor::config::Config;
use structural_editor::input::keys::{format_key, parse_key};
use structural_editor::model::scripted::{ExecutionLog, RecordingExecuter, Script, ScriptedEnv};
use structural_editor::services::tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "event_debug")]
#[command(about = "Show the edit action each key resolves to", long_about = None)]
struct Args {
    /// JSON script describing the cursor context and the predicates that hold
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Resolve these keys instead of reading the terminal
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    keys: Vec<String>,

    /// Path to log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

struct Debugger {
    session: EditorSession,
    log: ExecutionLog,
}

impl Debugger {
    fn new(config: Config, script: Script) -> Self {
        let executer = RecordingExecuter::new().suppressing(true);
        let log = executer.log();
        let session = EditorSession::new(
            config,
            Collaborators::scripted(ScriptedEnv::new(script), executer),
        );
        Self { session, log }
    }

    /// Feed one key and describe what happened
    fn feed(&mut self, key: &KeyEvent) -> anyhow::Result<String> {
        let before = self.log.borrow().len();
        let suppressed = self.session.on_key_down(key);

        let mut out = format!("{} (suppress default: {})", format_key(key), suppressed);
        for action in self.log.borrow().iter().skip(before) {
            out.push_str("\r\n  ");
            out.push_str(&serde_json::to_string(action)?);
        }
        if self.session.menu().is_menu_open() {
            let focused = self.session.menu().focused_option_text().unwrap_or("-");
            out.push_str(&format!("\r\n  menu open, focused: {focused}"));
        }
        Ok(out)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .unwrap_or_else(|| tracing_setup::default_log_file("event_debug"));
    tracing_setup::init_global(&log_file)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default(),
    };
    config.validate()?;

    let script = match &args.script {
        Some(path) => Script::load_from_file(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => Script::default(),
    };

    let mut debugger = Debugger::new(config, script);

    if !args.keys.is_empty() {
        for spec in &args.keys {
            let key = parse_key(spec).with_context(|| format!("unknown key {spec:?}"))?;
            println!("{}", debugger.feed(&key)?.replace("\r\n", "\n"));
        }
        return Ok(());
    }

    println!("Press keys to resolve them, Ctrl+Q to quit.");
    enable_raw_mode()?;
    let result = run_interactive(&mut debugger);
    disable_raw_mode()?;
    result
}

fn run_interactive(debugger: &mut Debugger) -> anyhow::Result<()> {
    loop {
        let Event::Key(key) = event_read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }
        print!("{}\r\n", debugger.feed(&key)?);
    }
}
