//! Configuration management for `twembed-core`.
//!
//! This module defines the attribute whitelist: the table of attribute names that may
//! ever reach the emitted markup, together with the pattern each value must fully match.
//! The built-in table is available through [`EmbedConfig::default`]; hosts can layer a
//! YAML file on top of it with [`EmbedConfig::load_from_file`] and [`merge_rules`].
//!
//! A config is plain data. It is compiled once into a `Whitelist` / `Classifier` and
//! passed explicitly to every component; nothing reads it from ambient state.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::errors::EmbedError;
use crate::sanitizers::compiler::compile_full_match;

/// Maximum allowed length for a pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

pub const DEFAULT_BASE_URL: &str = "https://twitter.com/";
pub const DEFAULT_ATTRIBUTE_PREFIX: &str = "data-";
pub const DEFAULT_HEIGHT: &str = "500";

/// Attribute whose prefixed form always carries a value in the sanitized output.
pub const HEIGHT_ATTRIBUTE: &str = "height";

/// A handle: 1-15 letters, digits or underscores, optionally prefixed with `@`.
pub const HANDLE_PATTERN: &str = r"@?[a-z0-9_]{1,15}";
/// A list slug: must not start with a digit, at most 25 characters in total.
pub const LIST_SLUG_PATTERN: &str = r"(?u:[^0-9].{0,24})";
pub const DIGITS_PATTERN: &str = r"[0-9]*";
pub const HEX_COLOR_PATTERN: &str = r"#[0-9a-f]{3}(?:[0-9a-f]{3})?";
pub const BOOLEAN_PATTERN: &str = r"true|false";

/// A single whitelisted attribute.
///
/// Patterns are always applied to the whole value; `chrome` and `^chrome$` behave the same.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttributeRule {
    /// Attribute name as supplied by the caller (e.g. "theme").
    pub name: String,
    /// Human-readable description of what the attribute controls.
    pub description: Option<String>,
    /// The validation pattern.
    pub pattern: Option<String>,
    /// Case-insensitive matching, ASCII-only where the pattern allows it.
    pub case_insensitive: bool,
    /// If true, the value must also pass a programmatic check (see `validators`).
    pub programmatic_validation: bool,
}

impl Default for AttributeRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            case_insensitive: false,
            programmatic_validation: false,
        }
    }
}

impl AttributeRule {
    pub fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn with_validator(mut self) -> Self {
        self.programmatic_validation = true;
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Scalar settings. `None` means "use the built-in default", which lets a user file
/// override only what it names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbedSettings {
    /// Site base the canonical URLs are built on. Must be http(s) and end with `/`.
    pub base_url: Option<String>,
    /// Prefix applied to every accepted attribute name.
    pub attribute_prefix: Option<String>,
    /// Value injected for the height attribute when the caller supplies none.
    pub default_height: Option<String>,
}

/// Top-level configuration: settings plus the whitelist table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedConfig {
    #[serde(default)]
    pub settings: EmbedSettings,
    #[serde(default)]
    pub rules: Vec<AttributeRule>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            settings: EmbedSettings::default(),
            rules: default_rules(),
        }
    }
}

impl EmbedConfig {
    /// Loads a whitelist configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading embed configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: EmbedConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} attribute rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// The built-in configuration.
    pub fn load_default() -> Self {
        debug!("Using built-in attribute whitelist.");
        Self::default()
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn attribute_prefix(&self) -> &str {
        self.settings
            .attribute_prefix
            .as_deref()
            .unwrap_or(DEFAULT_ATTRIBUTE_PREFIX)
    }

    pub fn default_height(&self) -> &str {
        self.settings.default_height.as_deref().unwrap_or(DEFAULT_HEIGHT)
    }

    /// Checks rule integrity: names, pattern presence and compilation, base URL shape.
    pub fn validate(&self) -> Result<(), EmbedError> {
        let mut rule_names = HashSet::new();
        let mut errors = Vec::new();

        if let Err(e) = check_base_url(self.base_url()) {
            errors.push(e.to_string());
        }

        for rule in &self.rules {
            if rule.name.is_empty() {
                errors.push("A rule has an empty `name` field.".to_string());
            } else if !rule_names.insert(rule.name.as_str()) {
                errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
            }

            let pattern = match &rule.pattern {
                Some(p) if !p.is_empty() => p,
                Some(_) => {
                    errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                    continue;
                }
                None => {
                    errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                    continue;
                }
            };

            if let Err(e) = compile_full_match(&rule.name, pattern, rule.case_insensitive) {
                errors.push(e.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EmbedError::InvalidConfig(errors.join("\n")))
        }
    }
}

/// Canonical URLs are built by appending to the base and end up in `href`
/// attributes, so only http(s) bases ending in `/` are accepted.
pub(crate) fn check_base_url(base: &str) -> Result<(), EmbedError> {
    let reason = if !(base.starts_with("https://") || base.starts_with("http://")) {
        "must start with http:// or https://"
    } else if !base.ends_with('/') {
        "must end with '/'"
    } else {
        return Ok(());
    };
    Err(EmbedError::InvalidBaseUrl(base.to_string(), reason.to_string()))
}

/// Merges a user configuration over the defaults.
///
/// User rules replace default rules of the same name; settings the user leaves unset
/// keep their default. Rule order follows the defaults, with new user rules appended.
pub fn merge_rules(default_config: EmbedConfig, user_config: Option<EmbedConfig>) -> EmbedConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
    let mut overrides: HashMap<String, AttributeRule> = user_cfg
        .rules
        .iter()
        .map(|rule| (rule.name.clone(), rule.clone()))
        .collect();

    let mut final_rules: Vec<AttributeRule> = default_config
        .rules
        .into_iter()
        .map(|rule| overrides.remove(&rule.name).unwrap_or(rule))
        .collect();
    final_rules.extend(
        user_cfg
            .rules
            .into_iter()
            .filter(|rule| overrides.contains_key(&rule.name)),
    );

    let defaults = default_config.settings;
    let user = user_cfg.settings;
    let settings = EmbedSettings {
        base_url: user.base_url.or(defaults.base_url),
        attribute_prefix: user.attribute_prefix.or(defaults.attribute_prefix),
        default_height: user.default_height.or(defaults.default_height),
    };

    debug!("Final total rules after merge: {}", final_rules.len());
    EmbedConfig { settings, rules: final_rules }
}

/// The built-in whitelist table.
pub fn default_rules() -> Vec<AttributeRule> {
    let digits = |name: &str| AttributeRule::new(name, DIGITS_PATTERN);
    vec![
        digits("widget-id").describe("Legacy widget identifier"),
        AttributeRule::new(
            "chrome",
            r"((noheader|nofooter|noborders|noscrollbar|transparent) ?){0,5}",
        )
        .case_insensitive()
        .with_validator()
        .describe("Space-separated widget chrome options"),
        digits("tweet-limit"),
        AttributeRule::new("aria-polite", r"off|polite|assertive").case_insensitive(),
        AttributeRule::new("related", r"(?s).*").describe("Free-form related accounts"),
        AttributeRule::new("lang", r"[a-z\-]{2,5}").case_insensitive(),
        AttributeRule::new("theme", r"light|dark").case_insensitive(),
        AttributeRule::new("link-color", HEX_COLOR_PATTERN).case_insensitive(),
        AttributeRule::new("border-color", HEX_COLOR_PATTERN).case_insensitive(),
        digits("width"),
        digits(HEIGHT_ATTRIBUTE),
        AttributeRule::new("show-replies", BOOLEAN_PATTERN).case_insensitive(),
        AttributeRule::new("dnt", BOOLEAN_PATTERN).case_insensitive(),
        AttributeRule::new("cards", r"hidden").case_insensitive(),
        AttributeRule::new("conversation", r"none").case_insensitive(),
        AttributeRule::new("align", r"left|center|right").case_insensitive(),
        // These may also select the embed kind; see `classifier`.
        AttributeRule::new("screen-name", HANDLE_PATTERN).case_insensitive(),
        digits("user-id"),
        AttributeRule::new("list-slug", LIST_SLUG_PATTERN),
        digits("list-id"),
        digits("tweet-id"),
        // Likes timeline (deprecated)
        AttributeRule::new("likes-screen-name", HANDLE_PATTERN).case_insensitive(),
    ]
}
