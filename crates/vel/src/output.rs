//! Output helpers for the `vel` CLI.

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde::Serialize;

/// Whether stdout wants colored output.
pub fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("error: failed to serialize output: {}", err),
    }
}

/// Style a final result value.
pub fn result_text(text: &str) -> String {
    if supports_color() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Style an explanation trace.
pub fn trace_text(text: &str) -> String {
    if supports_color() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}
