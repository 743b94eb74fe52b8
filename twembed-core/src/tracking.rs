// twembed-core/src/tracking.rs
//! Deprecated-usage notifications.
//!
//! The classifier reports deprecated input shapes through a [`UsageTracker`] so the
//! host can record them (e.g. as a page tracking category) without the core knowing
//! how.
//!
//! License: MIT OR APACHE 2.0

use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingCategory {
    /// A likes timeline was requested, by URL or by `likes-screen-name`.
    LikesTimeline,
}

impl TrackingCategory {
    pub fn key(self) -> &'static str {
        match self {
            TrackingCategory::LikesTimeline => "twitter-tag-likes-category",
        }
    }
}

pub trait UsageTracker {
    fn track(&mut self, category: TrackingCategory);
}

/// Discards every notification.
impl UsageTracker for () {
    fn track(&mut self, _category: TrackingCategory) {}
}

/// Writes each notification as a deprecation warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracker;

impl UsageTracker for LogTracker {
    fn track(&mut self, category: TrackingCategory) {
        warn!("Deprecated embed usage observed: {}", category.key());
    }
}

/// Collects notifications in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingTracker {
    pub categories: Vec<TrackingCategory>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, category: TrackingCategory) -> usize {
        self.categories.iter().filter(|c| **c == category).count()
    }
}

impl UsageTracker for RecordingTracker {
    fn track(&mut self, category: TrackingCategory) {
        self.categories.push(category);
    }
}
