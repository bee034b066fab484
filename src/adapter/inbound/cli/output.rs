//! Terminal and JSON-lines output for CLI handlers.
//!
//! Every message is a [`Line`]. Human mode renders it as an indented,
//! optionally colored line; JSON mode prints `{"type", "payload"}` on
//! stdout. Errors always go to stderr. Color is dropped when stdout is not
//! a terminal or `NO_COLOR` is set.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Settings taken from the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: u8,
    color: bool,
}

impl OutputConfig {
    /// Color follows the terminal and `NO_COLOR`.
    #[must_use]
    pub fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

static OUTPUT: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    *cell().read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Install the settings for the rest of the process.
pub fn configure(config: OutputConfig) {
    *cell().write().unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

/// Number of `-v` flags given.
#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// One unit of handler output.
enum Line<'a> {
    Section(&'a str),
    Field(&'a str, String),
    Success(&'a str),
    Warning(&'a str),
    Note(&'a str),
    Hint(&'a str),
    Block(&'a str),
}

impl Line<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Line::Section(_) => "section",
            Line::Field(..) => "field",
            Line::Success(_) => "success",
            Line::Warning(_) => "warning",
            Line::Note(_) => "note",
            Line::Hint(_) => "hint",
            Line::Block(_) => "lines",
        }
    }

    fn payload(&self) -> Value {
        match self {
            Line::Section(title) => json!({ "title": title }),
            Line::Field(label, value) => json!({ "label": label, "value": value }),
            Line::Block(content) => json!({ "content": content }),
            Line::Success(message)
            | Line::Warning(message)
            | Line::Note(message)
            | Line::Hint(message) => json!({ "message": message }),
        }
    }

    /// Warnings survive `--quiet`; everything else is suppressed.
    fn essential(&self) -> bool {
        matches!(self, Line::Warning(_))
    }

    fn render(&self, color: bool) -> String {
        let paint = |text: &str, styled: String| if color { styled } else { text.to_string() };
        match self {
            Line::Section(title) => format!("\n{}", paint(title, title.bold().to_string())),
            Line::Field(label, value) => {
                let label = format!("{label:<18}");
                format!("  {} {value}", paint(&label, label.dimmed().to_string()))
            }
            Line::Success(message) => format!("  {} {message}", paint("✓", "✓".green().to_string())),
            Line::Warning(message) => format!("  {} {message}", paint("!", "!".yellow().to_string())),
            Line::Note(message) => format!("  {}", paint(message, message.dimmed().to_string())),
            Line::Hint(message) => format!(
                "  {} {}",
                paint("hint:", "hint:".cyan().to_string()),
                paint(message, message.dimmed().to_string())
            ),
            Line::Block(content) => content
                .lines()
                .map(|line| format!("  {line}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn emit(line: &Line<'_>) {
    let config = current();
    if config.json {
        println!("{}", json!({ "type": line.kind(), "payload": line.payload() }));
        return;
    }
    if config.quiet && !line.essential() {
        return;
    }
    println!("{}", line.render(config.color));
}

pub fn section(title: &str) {
    emit(&Line::Section(title));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    emit(&Line::Field(label, value.to_string()));
}

pub fn success(message: &str) {
    emit(&Line::Success(message));
}

pub fn warning(message: &str) {
    emit(&Line::Warning(message));
}

pub fn note(message: &str) {
    emit(&Line::Note(message));
}

pub fn hint(message: &str) {
    emit(&Line::Hint(message));
}

/// Print pre-rendered multi-line content, such as a table.
pub fn lines(content: &str) {
    emit(&Line::Block(content));
}

/// Report a failure on stderr.
pub fn error(message: &str) {
    let config = current();
    if config.json {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else if config.color {
        eprintln!("  {} {message}", "×".red());
    } else {
        eprintln!("  × {message}");
    }
}

/// Print a command result object as one JSON line.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Emphasize a name or number inside a message.
pub fn highlight(value: impl Display) -> String {
    let config = current();
    if config.json || !config.color {
        return value.to_string();
    }
    value.cyan().to_string()
}

/// De-emphasize secondary text.
pub fn muted(value: impl Display) -> String {
    let config = current();
    if config.json || !config.color {
        return value.to_string();
    }
    value.dimmed().to_string()
}
