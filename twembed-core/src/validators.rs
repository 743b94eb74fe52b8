// File: twembed-core/src/validators.rs
//! Programmatic validation for attribute values.
//!
//! Some constraints are awkward to express as a single pattern. Rules flagged with
//! `programmatic_validation` run the matching check here after their pattern has
//! already accepted the value.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Maximum number of options a `chrome` value may carry.
pub const MAX_CHROME_OPTIONS: usize = 5;

static CHROME_OPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(["noheader", "nofooter", "noborders", "noscrollbar", "transparent"]);
    set
});

/// Validates a `chrome` value: space-separated known options, each at most once.
///
/// The empty value is accepted (no options). Tokens glued together without a
/// separator, such as `noheadernofooter`, are rejected.
pub fn is_valid_chrome_options(value: &str) -> bool {
    let mut seen = HashSet::new();
    for token in value.split(' ').filter(|t| !t.is_empty()) {
        let token = token.to_ascii_lowercase();
        if !CHROME_OPTIONS.contains(token.as_str()) || !seen.insert(token) {
            return false;
        }
    }
    seen.len() <= MAX_CHROME_OPTIONS
}

/// Runs the programmatic check registered for `rule_name`, if any.
///
/// Rules without a registered check pass.
pub fn run_validator(rule_name: &str, value: &str) -> bool {
    match rule_name {
        "chrome" => is_valid_chrome_options(value),
        _ => true,
    }
}
