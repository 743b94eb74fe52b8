// twembed-core/src/classification.rs
//! Result types produced by the classifier.
//!
//! Classification failures are values, not errors: the host renders an inline
//! message for them and carries on.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use std::fmt;

/// Why a set of attributes could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A URL was supplied but has none of the recognized shapes.
    UnsupportedUrl,
    /// No URL, handle, likes handle or widget id was supplied.
    MissingRequiredInput,
}

impl ErrorKind {
    /// Stable key the host localizes into a user-visible message.
    pub fn message_key(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedUrl => "twitter-tag-href",
            ErrorKind::MissingRequiredInput => "twitter-tag-widget-id",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::UnsupportedUrl => write!(f, "unsupported URL"),
            ErrorKind::MissingRequiredInput => write!(f, "missing required input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationResult {
    /// A user, list or likes timeline.
    Timeline { url: String },
    /// A single embedded post.
    Tweet { url: String },
    /// Legacy widget identified only by its numeric id.
    Placeholder,
    Invalid { reason: ErrorKind },
}

impl ClassificationResult {
    /// The embed kind, or `None` when classification failed.
    pub fn kind(&self) -> Option<EmbedKind> {
        match self {
            ClassificationResult::Timeline { .. } => Some(EmbedKind::Timeline),
            ClassificationResult::Tweet { .. } => Some(EmbedKind::Tweet),
            ClassificationResult::Placeholder => Some(EmbedKind::Placeholder),
            ClassificationResult::Invalid { .. } => None,
        }
    }

    /// The URL carried by timeline and tweet results.
    pub fn url(&self) -> Option<&str> {
        match self {
            ClassificationResult::Timeline { url } | ClassificationResult::Tweet { url } => {
                Some(url.as_str())
            }
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ClassificationResult::Invalid { .. })
    }
}

/// The output of one classification, with its side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub result: ClassificationResult,
    /// Set when the deprecated likes timeline was requested.
    pub legacy_likes: bool,
    /// Name of the rule that produced `result`.
    pub rule: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedKind {
    Timeline,
    Tweet,
    Placeholder,
}

impl EmbedKind {
    /// Class the client-side widget script looks for. Placeholders load as timelines.
    pub fn css_class(self) -> &'static str {
        match self {
            EmbedKind::Tweet => "twitter-tweet",
            EmbedKind::Timeline | EmbedKind::Placeholder => "twitter-timeline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_serialize_with_a_kind_tag() {
        let timeline = ClassificationResult::Timeline { url: "https://twitter.com/alice".into() };
        assert_eq!(
            serde_json::to_string(&timeline).unwrap(),
            r#"{"kind":"timeline","url":"https://twitter.com/alice"}"#
        );
        let invalid = ClassificationResult::Invalid { reason: ErrorKind::UnsupportedUrl };
        assert_eq!(
            serde_json::to_string(&invalid).unwrap(),
            r#"{"kind":"invalid","reason":"unsupported_url"}"#
        );
    }

    #[test]
    fn message_keys_are_stable() {
        assert_eq!(ErrorKind::UnsupportedUrl.message_key(), "twitter-tag-href");
        assert_eq!(ErrorKind::MissingRequiredInput.message_key(), "twitter-tag-widget-id");
    }
}
