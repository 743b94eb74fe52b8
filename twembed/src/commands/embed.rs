// twembed/src/commands/embed.rs
//! The `embed` command: classify and sanitize one set of attributes.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use twembed_core::{
    merge_rules, EmbedConfig, EmbedEngine, EmbedOutcome, RawAttributes, RecordingTracker,
    TrackingCategory,
};

use crate::cli::EmbedCommand;
use crate::ui::output_format;

/// Resolved inputs for [`run_embed`].
pub struct EmbedOptions {
    pub attributes: RawAttributes,
    pub config: EmbedConfig,
    pub pretty: bool,
}

impl EmbedOptions {
    pub fn from_command(cmd: &EmbedCommand) -> Result<Self> {
        Ok(Self {
            attributes: read_attributes(cmd.input.as_deref(), &cmd.attrs)?,
            config: load_config(cmd.config.as_deref())?,
            pretty: cmd.pretty,
        })
    }
}

/// What `embed` prints on stdout.
#[derive(Debug, Serialize)]
pub struct EmbedReport<'a> {
    pub outcome: &'a EmbedOutcome,
    /// Attributes for the outer widget element, present when the embed is ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_attributes: Option<BTreeMap<String, String>>,
    pub tracking_categories: Vec<&'static str>,
}

/// Merges an optional user config file over the built-in whitelist.
pub fn load_config(path: Option<&Path>) -> Result<EmbedConfig> {
    let user = match path {
        Some(p) => Some(
            EmbedConfig::load_from_file(p)
                .with_context(|| format!("Failed to load whitelist configuration {}", p.display()))?,
        ),
        None => None,
    };
    Ok(merge_rules(EmbedConfig::load_default(), user))
}

/// Collects attributes from an optional JSON file (or stdin for `-`), then applies
/// inline pairs on top.
pub fn read_attributes(input: Option<&Path>, pairs: &[(String, String)]) -> Result<RawAttributes> {
    let mut attributes = match input {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read attributes from stdin")?;
            parse_attributes(&text).context("Failed to parse attributes from stdin")?
        }
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read attributes file {}", path.display()))?;
            parse_attributes(&text)
                .with_context(|| format!("Failed to parse attributes file {}", path.display()))?
        }
        None => RawAttributes::new(),
    };

    for (key, value) in pairs {
        attributes.insert(key.as_str(), value.as_str());
    }
    debug!("Collected {} raw attribute(s).", attributes.len());
    Ok(attributes)
}

fn parse_attributes(text: &str) -> Result<RawAttributes> {
    Ok(serde_json::from_str(text)?)
}

/// Runs one embed and writes the JSON report to `out`.
///
/// Rejections and deprecated usage are also reported on stderr.
pub fn run_embed<W: Write>(opts: &EmbedOptions, out: &mut W) -> Result<EmbedOutcome> {
    info!("Starting embed classification.");
    let engine = EmbedEngine::new(opts.config.clone()).context("Failed to build embed engine")?;

    let mut tracker = RecordingTracker::new();
    let outcome = engine.prepare_tracked(&opts.attributes, &mut tracker);

    let report = EmbedReport {
        outcome: &outcome,
        element_attributes: outcome.plan().map(|plan| plan.element_attributes()),
        tracking_categories: tracker.categories.iter().map(|c| c.key()).collect(),
    };

    if opts.pretty {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    } else {
        serde_json::to_writer(&mut *out, &report)?;
    }
    writeln!(out)?;

    let color = output_format::stderr_supports_color();
    if let EmbedOutcome::Rejected { reason, message_key } = &outcome {
        output_format::print_error_message(
            &mut io::stderr(),
            &format!("Embed rejected: {} ({})", reason, message_key),
            color,
        )?;
    }
    if tracker.count(TrackingCategory::LikesTimeline) > 0 {
        output_format::print_warn_message(
            &mut io::stderr(),
            "Likes timelines are deprecated.",
            color,
        )?;
    }

    info!("Embed classification completed.");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> EmbedOptions {
        EmbedOptions {
            attributes: pairs.iter().copied().collect(),
            config: EmbedConfig::default(),
            pretty: false,
        }
    }

    #[test]
    fn ready_report_includes_element_attributes() -> Result<()> {
        let mut buf = Vec::new();
        let outcome = run_embed(&options(&[("screen-name", "alice")]), &mut buf)?;
        assert!(!outcome.is_rejected());

        let json: serde_json::Value = serde_json::from_slice(&buf)?;
        assert_eq!(json["outcome"]["status"], "ready");
        assert_eq!(json["outcome"]["kind"], "timeline");
        assert_eq!(json["outcome"]["url"], "https://twitter.com/alice");
        assert_eq!(json["element_attributes"]["class"], "twitter-timeline");
        assert_eq!(json["element_attributes"]["href"], "https://twitter.com/alice");
        assert_eq!(json["tracking_categories"], serde_json::json!([]));
        Ok(())
    }

    #[test]
    fn rejected_report_has_no_element_attributes() -> Result<()> {
        let mut buf = Vec::new();
        let outcome = run_embed(&options(&[("theme", "dark")]), &mut buf)?;
        assert!(outcome.is_rejected());

        let json: serde_json::Value = serde_json::from_slice(&buf)?;
        assert_eq!(json["outcome"]["status"], "rejected");
        assert_eq!(json["outcome"]["reason"], "missing_required_input");
        assert_eq!(json["outcome"]["message_key"], "twitter-tag-widget-id");
        assert!(json.get("element_attributes").is_none());
        Ok(())
    }

    #[test]
    fn inline_pairs_override_file_attributes() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(br#"{"screen-name":"alice","theme":"light"}"#)?;
        let pairs = vec![("theme".to_string(), "dark".to_string())];

        let attrs = read_attributes(Some(file.path()), &pairs)?;
        assert_eq!(attrs.get("screen-name"), Some("alice"));
        assert_eq!(attrs.get("theme"), Some("dark"));
        Ok(())
    }

    #[test]
    fn non_object_json_is_rejected() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(br#"["screen-name","alice"]"#)?;
        assert!(read_attributes(Some(file.path()), &[]).is_err());
        Ok(())
    }
}
