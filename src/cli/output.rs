use colored::Colorize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Plain,
    Info,
    Success,
    Warning,
    Error,
    Section,
}

static PLAIN_OUTPUT: AtomicBool = AtomicBool::new(false);

/// Disables colours and decorations, e.g. for scripted runs.
pub fn set_plain(plain: bool) {
    PLAIN_OUTPUT.store(plain, Ordering::Relaxed);
    colored::control::set_override(!plain);
}

fn is_plain() -> bool {
    PLAIN_OUTPUT.load(Ordering::Relaxed)
}

fn icon(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "[i]",
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Plain | MessageKind::Section => "",
    }
}

pub fn format_message(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Plain => text,
        _ => format!("{} {}", icon(kind), text),
    };

    if is_plain() {
        return base;
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info | MessageKind::Plain => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn line(message: impl fmt::Display) {
    print(MessageKind::Plain, message);
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(message: impl fmt::Display) {
    print(MessageKind::Section, message);
}
