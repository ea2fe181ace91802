//! Variable bindings at one step, and the changes between two steps.
//!
//! Both maps keep insertion order so that rendered diffs list variables in
//! the order the traced frame defined them.

use crate::canonical;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names starting with this prefix are system-reserved and never traced.
pub const DEFAULT_RESERVED_PREFIX: &str = "__";

/// Synthetic diff entry holding a return step's value.
pub const RETURN_KEY: &str = "return";

/// Whether `name` falls under the reserved prefix. An empty prefix reserves nothing.
pub fn is_reserved(name: &str, reserved_prefix: &str) -> bool {
    !reserved_prefix.is_empty() && name.starts_with(reserved_prefix)
}

/// All locals visible at one point in execution, as canonical display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    bindings: IndexMap<String, String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw frame locals, skipping reserved names.
    pub fn from_locals(locals: &IndexMap<String, Value>, reserved_prefix: &str) -> Self {
        let bindings = locals
            .iter()
            .filter(|(name, _)| !is_reserved(name, reserved_prefix))
            .map(|(name, value)| (name.clone(), canonical::stringify(value)))
            .collect();
        Self { bindings }
    }

    /// Bind `name` to the canonical form of `display`.
    pub fn insert(&mut self, name: impl Into<String>, display: &str) {
        self.bindings
            .insert(name.into(), canonical::canonicalize(display));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, display) in iter {
            snapshot.insert(name, display.as_ref());
        }
        snapshot
    }
}

/// Bindings that are new or changed relative to the preceding snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diff {
    entries: IndexMap<String, String>,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry. An existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fold in the entries of a diff recorded before this one.
    ///
    /// Earlier names come first; where both diffs bind a name, this diff's
    /// (newer) value wins.
    pub fn absorb_earlier(&mut self, earlier: Diff) {
        let mut merged = earlier.entries;
        for (name, value) in self.entries.drain(..) {
            merged.insert(name, value);
        }
        self.entries = merged;
    }
}

impl<K, V> FromIterator<(K, V)> for Diff
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_locals_skips_reserved_names() {
        let mut locals = IndexMap::new();
        locals.insert("__name__".to_string(), json!("__main__"));
        locals.insert("x".to_string(), json!(3));
        locals.insert("_private".to_string(), json!("kept"));

        let snapshot = Snapshot::from_locals(&locals, DEFAULT_RESERVED_PREFIX);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("x"), Some("3"));
        assert_eq!(snapshot.get("_private"), Some("kept"));
        assert_eq!(snapshot.get("__name__"), None);
    }

    #[test]
    fn test_empty_prefix_reserves_nothing() {
        assert!(!is_reserved("__file__", ""));
        assert!(is_reserved("__file__", "__"));
        assert!(!is_reserved("_x", "__"));
    }

    #[test]
    fn test_insert_canonicalizes_addresses() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("obj", "<__main__.Point object at 0x7f3a2c1d0e50>");
        assert_eq!(snapshot.get("obj"), Some("<__main__.Point object>"));
    }

    #[test]
    fn test_absorb_earlier_keeps_order_and_newer_values() {
        let mut newer: Diff = [("b", "20"), ("c", "3")].into_iter().collect();
        let earlier: Diff = [("a", "1"), ("b", "2")].into_iter().collect();

        newer.absorb_earlier(earlier);

        let entries: Vec<(&str, &str)> = newer.iter().collect();
        assert_eq!(entries, vec![("a", "1"), ("b", "20"), ("c", "3")]);
    }

    #[test]
    fn test_diff_serializes_as_plain_map() {
        let diff: Diff = [("x", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&diff).unwrap(), r#"{"x":"1"}"#);
    }
}
