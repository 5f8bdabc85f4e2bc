//! Explicit key/value mapping source.

use std::collections::HashMap;

use super::{PropertyTable, ValueSource};

/// A source backed by an explicit mapping.
///
/// Clones share storage: values inserted through one handle are visible to
/// every other handle, including one already handed to a provider. Use
/// [`MapSource::frozen`] for a copy detached from the table it was taken
/// from.
///
/// # Examples
///
/// ```
/// use propconf::source::{MapSource, ValueSource};
///
/// let overrides = MapSource::new().with_name("overrides");
/// let handle = overrides.clone();
///
/// handle.insert("spark.shuffle.io.maxRetries", "5");
/// assert_eq!(overrides.lookup("spark.shuffle.io.maxRetries").as_deref(), Some("5"));
/// assert_eq!(overrides.name(), "overrides");
/// ```
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    entries: PropertyTable,
}

impl MapSource {
    /// Creates an empty mapping named `"map"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "map".to_string(),
            entries: PropertyTable::new(),
        }
    }

    /// Creates a mapping holding `pairs`.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = Self::new();
        source.entries.extend(pairs);
        source
    }

    /// Creates a mapping over an owned snapshot, e.g. from
    /// [`PropertyTable::snapshot`].
    ///
    /// The result is detached from the table the snapshot was copied from.
    /// It is still an ordinary `MapSource`: `insert` and `remove` on it or
    /// its clones change it.
    #[must_use]
    pub fn frozen(entries: HashMap<String, String>) -> Self {
        Self::from_pairs(entries)
    }

    /// Sets the label reported by [`ValueSource::name`].
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.set(key, value)
    }

    /// Removes a value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Copies the current contents.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.snapshot()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl ValueSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_and_absent() {
        let source = MapSource::from_pairs([("a", "2"), ("b", "x")]);
        assert_eq!(source.lookup("a").as_deref(), Some("2"));
        assert_eq!(source.lookup("b").as_deref(), Some("x"));
        assert_eq!(source.lookup("c"), None);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_empty_string_is_present() {
        let source = MapSource::from_pairs([("blank", "")]);
        assert_eq!(source.lookup("blank").as_deref(), Some(""));
    }

    #[test]
    fn test_clones_share_updates() {
        let source = MapSource::new();
        let handle = source.clone();
        handle.insert("k", "1");
        assert_eq!(source.lookup("k").as_deref(), Some("1"));
        handle.remove("k");
        assert_eq!(source.lookup("k"), None);
    }

    #[test]
    fn test_frozen_from_snapshot() {
        let table = PropertyTable::new();
        table.set("k", "before");
        let frozen = MapSource::frozen(table.snapshot());
        table.set("k", "after");
        assert_eq!(frozen.lookup("k").as_deref(), Some("before"));

        frozen.clone().insert("k", "edited");
        assert_eq!(frozen.lookup("k").as_deref(), Some("edited"));
        assert_eq!(table.get("k").as_deref(), Some("after"));
    }

    #[test]
    fn test_collect_and_default_name() {
        let source: MapSource = vec![("x", "1")].into_iter().collect();
        assert_eq!(source.name(), "map");
        assert!(!source.is_empty());
        assert!(MapSource::default().is_empty());
    }
}
