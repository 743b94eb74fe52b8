// twembed-core/src/engine.rs
//! Runs the classifier and the attribute sanitizer over the same input and merges
//! their results into an [`EmbedPlan`] the host can render.
//!
//! The sanitizer runs regardless of the classification outcome; its output is only
//! handed to the host when classification succeeded.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::attributes::{RawAttributes, SanitizedAttributes};
use crate::classification::{ClassificationResult, EmbedKind, ErrorKind};
use crate::classifier::Classifier;
use crate::config::EmbedConfig;
use crate::sanitizers::attribute_sanitizer::AttributeSanitizer;
use crate::sanitizers::compiler::{compile_whitelist, Whitelist};
use crate::tracking::{LogTracker, UsageTracker};

/// Everything the host needs to render one embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedPlan {
    pub kind: EmbedKind,
    /// Canonical URL. Placeholders point at the bare base URL.
    pub url: String,
    pub attributes: SanitizedAttributes,
    pub legacy_likes: bool,
}

impl EmbedPlan {
    /// Attributes for the outer widget element: the sanitized set plus `class`,
    /// and `href` for timeline-style embeds. Tweets carry their URL on an inner link.
    pub fn element_attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = self.attributes.clone().into_inner();
        attrs.insert("class".to_string(), self.kind.css_class().to_string());
        if self.kind != EmbedKind::Tweet {
            attrs.insert("href".to_string(), self.url.clone());
        }
        attrs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmbedOutcome {
    Ready(EmbedPlan),
    Rejected { reason: ErrorKind, message_key: &'static str },
}

impl EmbedOutcome {
    pub fn plan(&self) -> Option<&EmbedPlan> {
        match self {
            EmbedOutcome::Ready(plan) => Some(plan),
            EmbedOutcome::Rejected { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, EmbedOutcome::Rejected { .. })
    }
}

/// A compiled classifier and whitelist. Immutable and shareable across threads.
#[derive(Debug)]
pub struct EmbedEngine {
    classifier: Classifier,
    whitelist: Whitelist,
}

impl EmbedEngine {
    /// Validates and compiles `config`. Empty or duplicate rule names and
    /// non-http(s) base URLs are rejected here, not only when loading from a file.
    pub fn new(config: EmbedConfig) -> Result<Self> {
        config.validate()?;
        let whitelist = compile_whitelist(&config)?;
        let classifier = Classifier::new(&config)?;
        debug!(
            "EmbedEngine ready: {} whitelisted attributes, base URL {}.",
            whitelist.len(),
            classifier.base_url()
        );
        Ok(Self { classifier, whitelist })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn sanitizer(&self) -> AttributeSanitizer<'_> {
        AttributeSanitizer::new(&self.whitelist)
    }

    /// Prepares an embed, logging deprecated usage.
    pub fn prepare(&self, raw: &RawAttributes) -> EmbedOutcome {
        self.prepare_tracked(raw, &mut LogTracker)
    }

    /// Prepares an embed, reporting deprecated usage to `tracker`.
    pub fn prepare_tracked(&self, raw: &RawAttributes, tracker: &mut dyn UsageTracker) -> EmbedOutcome {
        let classification = self.classifier.classify_tracked(raw, tracker);
        let attributes = self.sanitizer().sanitize(raw);

        let (kind, url) = match classification.result {
            ClassificationResult::Timeline { url } => (EmbedKind::Timeline, url),
            ClassificationResult::Tweet { url } => (EmbedKind::Tweet, url),
            ClassificationResult::Placeholder => {
                (EmbedKind::Placeholder, self.classifier.base_url().to_string())
            }
            ClassificationResult::Invalid { reason } => {
                debug!("Embed rejected: {}.", reason);
                return EmbedOutcome::Rejected { reason, message_key: reason.message_key() };
            }
        };

        EmbedOutcome::Ready(EmbedPlan {
            kind,
            url,
            attributes,
            legacy_likes: classification.legacy_likes,
        })
    }
}

/// One-shot convenience: compiles `config` and prepares a single embed.
pub fn headless_prepare(config: EmbedConfig, raw: &RawAttributes) -> Result<EmbedOutcome> {
    let engine = EmbedEngine::new(config)?;
    Ok(engine.prepare(raw))
}
