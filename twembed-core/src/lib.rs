// twembed-core/src/lib.rs
//! # twembed Core Library
//!
//! `twembed-core` decides *what* an embed tag asks for and *which* of its attributes may
//! be forwarded to the emitted markup. It never renders markup, fetches content or
//! localizes messages; those belong to the host.
//!
//! Two components run over the same caller-supplied attributes:
//!
//! * [`Classifier`]: picks the embed kind (timeline, tweet or legacy placeholder) and its
//!   canonical URL, or reports why it cannot.
//! * [`AttributeSanitizer`]: keeps only whitelisted attributes whose value fully matches
//!   the attribute's pattern, prefixes their names and injects the height default.
//!
//! [`EmbedEngine`] compiles both once from an [`EmbedConfig`] and merges their results into
//! an [`EmbedPlan`].
//!
//! ## Modules
//!
//! * `config`: The whitelist table, YAML loading and merging.
//! * `sanitizers`: Whitelist compilation and the attribute sanitizer.
//! * `validators`: Programmatic checks for values a pattern cannot fully describe.
//! * `classifier`: Ordered classification rules.
//! * `classification`: Classification result types.
//! * `tracking`: Deprecated-usage notifications.
//! * `attributes`: Raw and sanitized attribute maps.
//! * `engine`: The combined engine and embed plans.
//!
//! ## Usage Example
//!
//! ```rust
//! use twembed_core::{EmbedConfig, EmbedEngine, EmbedKind, RawAttributes};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = EmbedEngine::new(EmbedConfig::default())?;
//!
//!     let mut raw = RawAttributes::new();
//!     raw.insert("screen-name", "alice");
//!     raw.insert("tweet-id", "123");
//!     raw.insert("onclick", "alert(1)");
//!
//!     let outcome = engine.prepare(&raw);
//!     let plan = outcome.plan().expect("classified");
//!     assert_eq!(plan.kind, EmbedKind::Tweet);
//!     assert_eq!(plan.url, "https://twitter.com/alice/status/123");
//!     assert_eq!(plan.attributes.get("data-height"), Some("500"));
//!     assert!(!plan.attributes.contains_key("data-onclick"));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Classification failures are data ([`ClassificationResult::Invalid`],
//! [`EmbedOutcome::Rejected`]). Only building a configuration can fail, with
//! [`EmbedError`] or `anyhow::Error` at the file-loading boundary.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod attributes;
pub mod classification;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod errors;
pub mod sanitizers;
pub mod tracking;
pub mod validators;

pub use attributes::{RawAttributes, SanitizedAttributes};

pub use classification::{Classification, ClassificationResult, EmbedKind, ErrorKind};

pub use classifier::{ClassificationRule, Classifier};

pub use config::{
    merge_rules,
    AttributeRule,
    EmbedConfig,
    EmbedSettings,
    MAX_PATTERN_LENGTH,
};

pub use engine::{headless_prepare, EmbedEngine, EmbedOutcome, EmbedPlan};

pub use errors::EmbedError;

pub use sanitizers::attribute_sanitizer::{sanitize, AttributeSanitizer};
pub use sanitizers::compiler::{compile_whitelist, CompiledAttributeRule, Whitelist};

pub use tracking::{LogTracker, RecordingTracker, TrackingCategory, UsageTracker};
