// twembed/src/commands/rules.rs
//! The `rules` command: print the effective attribute whitelist.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use std::io::Write;
use std::path::Path;

use twembed_core::EmbedEngine;

use crate::commands::embed::load_config;

/// Writes the merged whitelist as a table. The config is compiled first, so a
/// broken pattern fails here rather than printing a table that cannot be used.
pub fn run_rules<W: Write>(config_path: Option<&Path>, out: &mut W) -> Result<()> {
    let config = load_config(config_path)?;
    EmbedEngine::new(config.clone()).context("Whitelist configuration does not compile")?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec!["Attribute", "Output name", "Pattern", "Case-insensitive", "Validator"]);

    let prefix = config.attribute_prefix();
    for rule in &config.rules {
        table.add_row(vec![
            rule.name.clone(),
            format!("{}{}", prefix, rule.name),
            rule.pattern.clone().unwrap_or_default(),
            yes_no(rule.case_insensitive).to_string(),
            yes_no(rule.programmatic_validation).to_string(),
        ]);
    }

    writeln!(out, "{}", table)?;
    writeln!(
        out,
        "Base URL: {}    Default height: {}",
        config.base_url(),
        config.default_height()
    )?;
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
