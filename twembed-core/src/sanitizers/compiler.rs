//! compiler.rs - Compiles an `EmbedConfig` into a `Whitelist`.
//!
//! Every pattern is wrapped as `^(?:pattern)$` so it can only ever match a whole
//! value. Case-insensitive rules are first compiled with Unicode disabled, which
//! limits case folding to ASCII letters (so `K` never matches the Kelvin sign).
//! Patterns that need Unicode to be valid at all, such as `.` or `[^...]`, are
//! compiled with Unicode case folding instead.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use crate::config::{EmbedConfig, MAX_PATTERN_LENGTH};
use crate::errors::EmbedError;

/// Compiles `pattern` so that it only accepts complete values.
pub fn compile_full_match(
    name: &str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<Regex, EmbedError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(EmbedError::PatternLengthExceeded(
            name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let anchored = format!("^(?:{})$", pattern);
    let build = |unicode: bool| {
        RegexBuilder::new(&anchored)
            .case_insensitive(case_insensitive)
            .unicode(unicode)
            .size_limit(1 << 20)
            .build()
    };

    let compiled = if case_insensitive {
        build(false).or_else(|ascii_err| {
            debug!(
                "Rule '{}' needs Unicode mode ({}); using Unicode case folding.",
                name, ascii_err
            );
            build(true)
        })
    } else {
        build(true)
    };
    compiled.map_err(|e| EmbedError::RuleCompilationError(name.to_string(), e))
}

/// A single compiled whitelist entry.
#[derive(Debug)]
pub struct CompiledAttributeRule {
    pub name: String,
    pub regex: Regex,
    pub programmatic_validation: bool,
}

/// The compiled, immutable whitelist plus the settings the sanitizer needs.
#[derive(Debug)]
pub struct Whitelist {
    rules: HashMap<String, CompiledAttributeRule>,
    prefix: String,
    default_height: String,
}

impl Whitelist {
    pub fn get(&self, name: &str) -> Option<&CompiledAttributeRule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn default_height(&self) -> &str {
        &self.default_height
    }

    /// Attribute names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Compiles every rule of `config`. All failures are collected and reported together.
pub fn compile_whitelist(config: &EmbedConfig) -> Result<Whitelist, EmbedError> {
    debug!("Starting compilation of {} attribute rules.", config.rules.len());

    let mut rules = HashMap::with_capacity(config.rules.len());
    let mut compilation_errors = Vec::new();

    for rule in &config.rules {
        let Some(pattern) = rule.pattern.as_deref() else {
            compilation_errors.push(EmbedError::Fatal(format!(
                "Rule '{}' is missing the `pattern` field.",
                rule.name
            )));
            continue;
        };

        match compile_full_match(&rule.name, pattern, rule.case_insensitive) {
            Ok(regex) => {
                debug!(target: "twembed_core::sanitizer", "Rule '{}' compiled successfully.", rule.name);
                rules.insert(
                    rule.name.clone(),
                    CompiledAttributeRule {
                        name: rule.name.clone(),
                        regex,
                        programmatic_validation: rule.programmatic_validation,
                    },
                );
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(EmbedError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling whitelist. Total compiled: {}.", rules.len());
    Ok(Whitelist {
        rules,
        prefix: config.attribute_prefix().to_string(),
        default_height: config.default_height().to_string(),
    })
}
