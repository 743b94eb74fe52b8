// twembed-core/src/attributes.rs
//! Attribute maps passed into and out of the core.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes exactly as the caller supplied them. Keys are arbitrary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawAttributes(BTreeMap<String, String>);

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The value of `name` if it is present and non-empty.
    pub fn provided(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Whitelisted attributes, keyed by their prefixed name (e.g. `data-theme`).
///
/// Only the sanitizer constructs values of this type, so every key is either the
/// injected height default or derived from a whitelisted name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedAttributes(BTreeMap<String, String>);

impl SanitizedAttributes {
    pub(crate) fn with_default(key: String, value: String) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key, value);
        Self(map)
    }

    pub(crate) fn accept(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provided_ignores_empty_values() {
        let raw: RawAttributes = [("href", ""), ("screen-name", "alice")].into_iter().collect();
        assert_eq!(raw.provided("href"), None);
        assert_eq!(raw.get("href"), Some(""));
        assert_eq!(raw.provided("screen-name"), Some("alice"));
        assert_eq!(raw.provided("missing"), None);
    }

    #[test]
    fn raw_attributes_deserialize_from_a_json_object() {
        let raw: RawAttributes = serde_json::from_str(r#"{"theme":"dark","width":"300"}"#).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get("theme"), Some("dark"));
    }
}
