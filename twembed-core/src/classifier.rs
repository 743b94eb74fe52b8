// twembed-core/src/classifier.rs
//! Decides which embed a set of attributes asks for, and its canonical URL.
//!
//! Classification is an ordered list of guarded rules; the first rule whose guard
//! holds decides the result:
//!
//! 1. `href` - an explicit URL, which must be a user/list timeline, a likes
//!    timeline or a single post under the base URL.
//! 2. `screen-name` - a handle, optionally narrowed by `tweet-id` or `list-slug`.
//! 3. `likes-screen-name` - the deprecated likes timeline.
//! 4. `widget-id` - a bare legacy placeholder.
//!
//! When no rule applies the result is `MissingRequiredInput`. Every URL shape is
//! anchored at both ends; a matched `href` is returned verbatim and ends up in a
//! URL attribute, so partial matches must never be accepted.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::Regex;

use crate::attributes::RawAttributes;
use crate::classification::{Classification, ClassificationResult, ErrorKind};
use crate::config::{
    check_base_url, DIGITS_PATTERN, EmbedConfig, HANDLE_PATTERN, LIST_SLUG_PATTERN,
};
use crate::errors::EmbedError;
use crate::sanitizers::compiler::compile_full_match;
use crate::tracking::{LogTracker, TrackingCategory, UsageTracker};

pub const HREF: &str = "href";
pub const SCREEN_NAME: &str = "screen-name";
pub const TWEET_ID: &str = "tweet-id";
pub const LIST_SLUG: &str = "list-slug";
pub const LIKES_SCREEN_NAME: &str = "likes-screen-name";
pub const WIDGET_ID: &str = "widget-id";

/// Name reported when no rule applied.
pub const MISSING_INPUT_RULE: &str = "missing-input";

type RuleFn = fn(&Classifier, &RawAttributes) -> Option<Classification>;

/// A named, guarded classification step.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub name: &'static str,
    apply: RuleFn,
}

impl ClassificationRule {
    /// Runs this rule alone. `None` means its guard did not hold.
    pub fn apply(&self, classifier: &Classifier, raw: &RawAttributes) -> Option<Classification> {
        (self.apply)(classifier, raw)
    }
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule").field("name", &self.name).finish()
    }
}

static RULES: [ClassificationRule; 4] = [
    ClassificationRule { name: HREF, apply: by_href },
    ClassificationRule { name: SCREEN_NAME, apply: by_screen_name },
    ClassificationRule { name: LIKES_SCREEN_NAME, apply: by_likes_screen_name },
    ClassificationRule { name: WIDGET_ID, apply: by_widget_id },
];

#[derive(Debug)]
pub struct Classifier {
    base_url: String,
    user_timeline: Regex,
    list_timeline: Regex,
    likes_timeline: Regex,
    tweet_url: Regex,
    handle: Regex,
    list_slug: Regex,
    digits: Regex,
}

impl Classifier {
    /// Compiles the URL shapes for `config`'s base URL.
    pub fn new(config: &EmbedConfig) -> Result<Self, EmbedError> {
        let base_url = config.base_url().to_string();
        check_base_url(&base_url)?;

        let base = regex::escape(&base_url);
        let url_shape = |name: &str, suffix: &str| {
            compile_full_match(name, &format!("{}(?:{}){}", base, HANDLE_PATTERN, suffix), true)
        };

        Ok(Self {
            user_timeline: url_shape("user-timeline", "")?,
            list_timeline: url_shape("list-timeline", &format!("/lists/{}", LIST_SLUG_PATTERN))?,
            likes_timeline: url_shape("likes-timeline", "/likes")?,
            tweet_url: url_shape("tweet", "/status/[0-9]+")?,
            handle: compile_full_match(SCREEN_NAME, HANDLE_PATTERN, true)?,
            list_slug: compile_full_match(LIST_SLUG, LIST_SLUG_PATTERN, false)?,
            digits: compile_full_match("digits", DIGITS_PATTERN, false)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The guarded rules in evaluation order.
    pub fn rules(&self) -> &'static [ClassificationRule] {
        &RULES
    }

    /// Classifies `raw`, logging deprecated usage.
    pub fn classify(&self, raw: &RawAttributes) -> Classification {
        self.classify_tracked(raw, &mut LogTracker)
    }

    /// Classifies `raw`, reporting deprecated usage to `tracker` exactly once when it occurs.
    pub fn classify_tracked(
        &self,
        raw: &RawAttributes,
        tracker: &mut dyn UsageTracker,
    ) -> Classification {
        let classification = RULES
            .iter()
            .find_map(|rule| rule.apply(self, raw))
            .unwrap_or(Classification {
                result: ClassificationResult::Invalid { reason: ErrorKind::MissingRequiredInput },
                legacy_likes: false,
                rule: MISSING_INPUT_RULE,
            });

        debug!(
            "Rule '{}' classified attributes as {:?}.",
            classification.rule, classification.result
        );

        if classification.legacy_likes {
            tracker.track(TrackingCategory::LikesTimeline);
        }
        classification
    }

    fn is_handle(&self, value: &str) -> bool {
        self.handle.is_match(value)
    }

    fn is_digits(&self, value: &str) -> bool {
        self.digits.is_match(value)
    }
}

fn found(rule: &'static str, result: ClassificationResult, legacy_likes: bool) -> Classification {
    Classification { result, legacy_likes, rule }
}

fn by_href(c: &Classifier, raw: &RawAttributes) -> Option<Classification> {
    let href = raw.provided(HREF)?;

    let classification = if c.user_timeline.is_match(href) || c.list_timeline.is_match(href) {
        found(HREF, ClassificationResult::Timeline { url: href.to_string() }, false)
    } else if c.likes_timeline.is_match(href) {
        found(HREF, ClassificationResult::Timeline { url: href.to_string() }, true)
    } else if c.tweet_url.is_match(href) {
        found(HREF, ClassificationResult::Tweet { url: href.to_string() }, false)
    } else {
        debug!("Rejecting href with unrecognized shape.");
        found(HREF, ClassificationResult::Invalid { reason: ErrorKind::UnsupportedUrl }, false)
    };
    Some(classification)
}

fn by_screen_name(c: &Classifier, raw: &RawAttributes) -> Option<Classification> {
    let handle = raw.provided(SCREEN_NAME).filter(|h| c.is_handle(h))?;
    let base = c.base_url();

    let result = if let Some(id) = raw.provided(TWEET_ID).filter(|id| c.is_digits(id)) {
        ClassificationResult::Tweet { url: format!("{}{}/status/{}", base, handle, id) }
    } else if let Some(slug) = raw.provided(LIST_SLUG).filter(|s| c.list_slug.is_match(s)) {
        ClassificationResult::Timeline { url: format!("{}{}/lists/{}", base, handle, slug) }
    } else {
        ClassificationResult::Timeline { url: format!("{}{}", base, handle) }
    };
    Some(found(SCREEN_NAME, result, false))
}

fn by_likes_screen_name(c: &Classifier, raw: &RawAttributes) -> Option<Classification> {
    let handle = raw.provided(LIKES_SCREEN_NAME).filter(|h| c.is_handle(h))?;
    let url = format!("{}{}/likes", c.base_url(), handle);
    Some(found(LIKES_SCREEN_NAME, ClassificationResult::Timeline { url }, true))
}

fn by_widget_id(c: &Classifier, raw: &RawAttributes) -> Option<Classification> {
    raw.provided(WIDGET_ID).filter(|id| c.is_digits(id))?;
    Some(found(WIDGET_ID, ClassificationResult::Placeholder, false))
}
