// twembed/src/main.rs
//! twembed entry point.
//!
//! Parses the command line, initialises logging and dispatches to a command.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use twembed::cli::{Cli, Commands};
use twembed::commands::embed::{run_embed, EmbedOptions};
use twembed::commands::rules::run_rules;
use twembed::logger;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            twembed::ui::output_format::print_error_message(
                &mut io::stderr(),
                &format!("{:#}", e),
                twembed::ui::output_format::stderr_supports_color(),
            )
            .ok();
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match args.command {
        Commands::Embed(cmd) => {
            let strict = cmd.strict;
            let opts = EmbedOptions::from_command(&cmd)?;
            let stdout = io::stdout();
            let outcome = run_embed(&opts, &mut stdout.lock())?;
            if strict && outcome.is_rejected() {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Rules(cmd) => {
            run_rules(cmd.config.as_deref(), &mut io::stdout().lock())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
