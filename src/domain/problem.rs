//! Problem domain model
//!
//! A problem record is what a provider hands over after fetching a problem
//! and what the store hands back after reading a problem file. The on-disk
//! text form lives in [`crate::storage::ProblemFormat`].

use serde::Serialize;
use std::collections::BTreeMap;

use super::language::Language;

/// Provider-specific key/value pairs kept alongside a problem
///
/// Values may be absent; absent values are never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProblemMeta(BTreeMap<String, Option<String>>);

impl ProblemMeta {
    /// Creates empty metadata
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Gets a present value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Returns true if the key is known, even with an absent value
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Records a key whose value is absent
    pub fn set_absent(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), None);
    }

    /// Removes a key
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.0.remove(key)
    }

    /// Returns true if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys, including those with absent values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<String>)> {
        self.0.iter()
    }

    /// Iterates over entries whose value is present
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProblemMeta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

/// A problem together with the solution being worked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemRecord {
    /// Display title, single line
    pub title: String,

    /// Filename-safe identifier
    pub title_slug: String,

    pub difficulty: String,

    pub category: String,

    /// Topic tags in display order
    pub tags: Vec<String>,

    /// Problem statement, may span lines
    pub description: String,

    pub language: Language,

    /// Solution source, may span lines
    pub solution_code: String,

    pub metadata: ProblemMeta,
}

impl ProblemRecord {
    /// Creates a record with empty tags, description, code and metadata
    pub fn new(
        title: impl Into<String>,
        title_slug: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            title: title.into(),
            title_slug: title_slug.into(),
            difficulty: String::new(),
            category: String::new(),
            tags: Vec::new(),
            description: String::new(),
            language,
            solution_code: String::new(),
            metadata: ProblemMeta::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_not_present() {
        let mut meta = ProblemMeta::new();
        meta.set("problem_id", "1");
        meta.set_absent("test_input");

        assert!(meta.contains("test_input"));
        assert_eq!(meta.get("test_input"), None);
        assert_eq!(meta.get("problem_id"), Some("1"));
        assert_eq!(meta.present().collect::<Vec<_>>(), vec![("problem_id", "1")]);
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn collect_from_pairs() {
        let meta: ProblemMeta = [("b", "2"), ("a", "1")].into_iter().collect();
        let keys: Vec<_> = meta.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
