// twembed/src/cli.rs
//! Command-line interface definition for twembed.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "twembed",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Classify and sanitize embed-tag attributes",
    long_about = "twembed decides which embed (timeline, tweet or legacy placeholder) a set of tag attributes asks for, derives its canonical URL, and filters the attributes through a whitelist. The result is printed as JSON for a renderer to turn into markup.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable all log output
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classifies and sanitizes one set of attributes.
    #[command(about = "Classify and sanitize one set of attributes and print the embed plan as JSON.")]
    Embed(EmbedCommand),

    /// Prints the effective attribute whitelist.
    #[command(about = "Print the effective attribute whitelist.")]
    Rules(RulesCommand),
}

/// Arguments for the `embed` command.
#[derive(Parser, Debug)]
pub struct EmbedCommand {
    /// Attributes given inline; later flags override earlier ones and the input file.
    #[arg(
        long = "attr",
        short = 'a',
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "An attribute as KEY=VALUE. May be repeated."
    )]
    pub attrs: Vec<(String, String)>,

    /// JSON object of attributes; `-` reads stdin.
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read a JSON object of attributes from FILE ('-' for stdin).")]
    pub input: Option<PathBuf>,

    /// Custom whitelist configuration (YAML), merged over the built-in table.
    #[arg(long = "config", value_name = "FILE", env = "TWEMBED_CONFIG", help = "Path to a YAML whitelist configuration merged over the defaults.")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output.")]
    pub pretty: bool,

    #[arg(long, help = "Exit with status 2 when the attributes cannot be classified.")]
    pub strict: bool,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    #[arg(long = "config", value_name = "FILE", env = "TWEMBED_CONFIG", help = "Path to a YAML whitelist configuration merged over the defaults.")]
    pub config: Option<PathBuf>,
}

/// Parses `KEY=VALUE`. The value may be empty; the key may not.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty attribute name in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_on_the_first_equals_sign() {
        assert_eq!(
            parse_key_value("href=https://twitter.com/a?x=1").unwrap(),
            ("href".to_string(), "https://twitter.com/a?x=1".to_string())
        );
        assert_eq!(parse_key_value("related=").unwrap(), ("related".to_string(), String::new()));
        assert!(parse_key_value("theme").is_err());
        assert!(parse_key_value("=dark").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
