//! Terminal and JSON rendering for CLI commands.
//!
//! Handlers pick a [`Mode`] once and then write through the helpers here.
//! In JSON mode each helper prints a single `{"event": ...}` object per
//! line; commands with a structured result print it with [`json`].
//! Warnings and errors are never silenced.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// How command results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Colored text for a terminal.
    #[default]
    Human,
    /// Only warnings and errors.
    Quiet,
    /// Machine-readable lines on stdout.
    Json,
}

/// Rendering settings taken from the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub mode: Mode,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    /// `--json` takes precedence over `--quiet`.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        let mode = if json {
            Mode::Json
        } else if quiet {
            Mode::Quiet
        } else {
            Mode::Human
        };
        Self { mode, verbose }
    }
}

static CURRENT: RwLock<OutputConfig> =
    parking_lot::const_rwlock(OutputConfig::new(false, false, 0));

/// Install the settings for the rest of the process.
pub fn configure(config: OutputConfig) {
    *CURRENT.write() = config;
}

#[must_use]
pub fn mode() -> Mode {
    CURRENT.read().mode
}

#[must_use]
pub fn verbosity() -> u8 {
    CURRENT.read().verbose
}

/// One rendered line of command output.
enum Line<'a> {
    Banner(&'a str),
    Title(&'a str),
    Field(&'a str, String),
    Success(&'a str),
    Warning(&'a str),
    Hint(&'a str),
}

impl Line<'_> {
    /// Warnings survive `--quiet`.
    fn shown_when_quiet(&self) -> bool {
        matches!(self, Line::Warning(_))
    }

    fn to_json(&self) -> Value {
        match self {
            Line::Banner(version) => json!({ "event": "start", "version": version }),
            Line::Title(title) => json!({ "event": "title", "title": title }),
            Line::Field(label, value) => json!({ "event": "field", "label": label, "value": value }),
            Line::Success(message) => json!({ "event": "success", "message": message }),
            Line::Warning(message) => json!({ "event": "warning", "message": message }),
            Line::Hint(message) => json!({ "event": "hint", "message": message }),
        }
    }

    fn print_human(&self) {
        match self {
            Line::Banner(version) => println!("{} {}\n", "slotwatch".bold(), version.dimmed()),
            Line::Title(title) => println!("\n{}", title.bold().underline()),
            Line::Field(label, value) => println!("  {:<16} {value}", format!("{label}:").dimmed()),
            Line::Success(message) => println!("  {} {message}", "ok".green().bold()),
            Line::Warning(message) => println!("  {} {message}", "warn".yellow().bold()),
            Line::Hint(message) => println!("  {} {}", "->".cyan(), message.dimmed()),
        }
    }
}

fn emit(line: &Line<'_>) {
    match mode() {
        Mode::Json => println!("{}", line.to_json()),
        Mode::Quiet if !line.shown_when_quiet() => {}
        Mode::Human | Mode::Quiet => line.print_human(),
    }
}

/// Name and version, printed before the poller starts.
pub fn banner(version: &str) {
    emit(&Line::Banner(version));
}

pub fn title(text: &str) {
    emit(&Line::Title(text));
}

pub fn field(label: &str, value: impl Display) {
    emit(&Line::Field(label, value.to_string()));
}

pub fn success(message: &str) {
    emit(&Line::Success(message));
}

pub fn warning(message: &str) {
    emit(&Line::Warning(message));
}

/// A follow-up command the user may want to run.
pub fn hint(message: &str) {
    emit(&Line::Hint(message));
}

/// Report a failed command on stderr.
pub fn error(message: &str) {
    if mode() == Mode::Json {
        eprintln!("{}", json!({ "event": "error", "message": message }));
    } else {
        eprintln!("{} {message}", "error:".red().bold());
    }
}

/// Print rows as an indented table. Nothing is printed in quiet or JSON mode.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    if mode() != Mode::Human {
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

/// Cyan in human mode, plain otherwise.
pub fn emphasis(value: impl Display) -> String {
    match mode() {
        Mode::Json => value.to_string(),
        Mode::Human | Mode::Quiet => value.cyan().to_string(),
    }
}

/// Print a command's structured result as one JSON line.
pub fn json(value: &Value) {
    println!("{value}");
}
