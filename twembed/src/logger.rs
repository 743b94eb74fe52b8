// twembed/src/logger.rs
//! Logger initialisation for the twembed binary.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialises `env_logger` on stderr.
///
/// `RUST_LOG` decides the level unless `level_override` is given; without either,
/// only warnings and errors are shown. Safe to call more than once.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    builder.try_init().ok();
}
