// twembed-core/src/sanitizers/attribute_sanitizer.rs
//! Filters raw attributes through the whitelist.
//!
//! The output only ever holds prefixed names of whitelisted attributes whose value
//! fully matched the attribute's pattern (and passed its programmatic check), plus
//! the injected height default. Nothing is reported for dropped attributes beyond a
//! debug log line; this is a strict filter, not a validator.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::attributes::{RawAttributes, SanitizedAttributes};
use crate::config::HEIGHT_ATTRIBUTE;
use crate::sanitizers::compiler::Whitelist;
use crate::validators;

#[derive(Debug, Clone, Copy)]
pub struct AttributeSanitizer<'a> {
    whitelist: &'a Whitelist,
}

impl<'a> AttributeSanitizer<'a> {
    pub fn new(whitelist: &'a Whitelist) -> Self {
        Self { whitelist }
    }

    /// Produces the sanitized attribute map for `raw`.
    pub fn sanitize(&self, raw: &RawAttributes) -> SanitizedAttributes {
        let prefix = self.whitelist.prefix();
        let mut sanitized = SanitizedAttributes::with_default(
            format!("{}{}", prefix, HEIGHT_ATTRIBUTE),
            self.whitelist.default_height().to_string(),
        );

        for (name, value) in raw.iter() {
            if self.accepts(name, value) {
                sanitized.accept(format!("{}{}", prefix, name), value.to_string());
            }
        }

        debug!(
            "Sanitized {} raw attribute(s) into {} output attribute(s).",
            raw.len(),
            sanitized.len()
        );
        sanitized
    }

    /// Whether `value` is acceptable for attribute `name`.
    pub fn accepts(&self, name: &str, value: &str) -> bool {
        let Some(rule) = self.whitelist.get(name) else {
            debug!("Dropping attribute '{}': not whitelisted.", name);
            return false;
        };

        if !rule.regex.is_match(value) {
            debug!("Dropping attribute '{}': value does not match its pattern.", name);
            return false;
        }

        if rule.programmatic_validation && !validators::run_validator(&rule.name, value) {
            debug!("Dropping attribute '{}': value failed programmatic validation.", name);
            return false;
        }

        true
    }
}

/// One-shot convenience wrapper around [`AttributeSanitizer::sanitize`].
pub fn sanitize(raw: &RawAttributes, whitelist: &Whitelist) -> SanitizedAttributes {
    AttributeSanitizer::new(whitelist).sanitize(raw)
}
