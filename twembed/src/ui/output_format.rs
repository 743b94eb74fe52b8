// twembed/src/ui/output_format.rs
//! Coloured status lines on stderr.
//!
//! Colour is only applied when the caller says the stream supports it; tests and
//! pipes get plain text.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn stderr_supports_color() -> bool {
    io::stderr().is_terminal()
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), msg.yellow())
    } else {
        writeln!(writer, "Warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Error:".red().bold(), msg.red())
    } else {
        writeln!(writer, "Error: {}", msg)
    }
}
