//! Process-wide property table and the source that reads it.
//!
//! The table plays the role of "system properties": any code in the process
//! may set or clear entries at any time. It is passed around as an explicit
//! handle so tests can build an isolated table instead of mutating the
//! global one.
//!
//! Reads never take a lock. The table is copy-on-write behind an atomic
//! pointer: a reader sees either the table before a write or the table after
//! it, never a partial update.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::ValueSource;

static GLOBAL: OnceLock<PropertyTable> = OnceLock::new();

/// A shared, concurrently mutable table of string properties.
///
/// Cloning a `PropertyTable` yields another handle to the same storage.
///
/// # Examples
///
/// ```
/// use propconf::source::PropertyTable;
///
/// let table = PropertyTable::new();
/// let handle = table.clone();
///
/// table.set("spark.network.timeout", "300s");
/// assert_eq!(handle.get("spark.network.timeout").as_deref(), Some("300s"));
/// ```
#[derive(Clone)]
pub struct PropertyTable {
    entries: Arc<ArcSwap<HashMap<String, String>>>,
}

impl PropertyTable {
    /// Creates an empty, isolated table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(ArcSwap::from_pointee(HashMap::new())),
        }
    }

    /// Returns the process-wide table.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Reads a single property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.load().get(key).cloned()
    }

    /// Sets a property, returning the previous value if there was one.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        let mut previous = None;
        self.entries.rcu(|current| {
            let mut next = HashMap::clone(current);
            previous = next.insert(key.clone(), value.clone());
            next
        });
        previous
    }

    /// Removes a property, returning its value if it was set.
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut previous = None;
        self.entries.rcu(|current| {
            let mut next = HashMap::clone(current);
            previous = next.remove(key);
            next
        });
        previous
    }

    /// Sets many properties in one atomic step.
    pub fn extend<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let additions: Vec<(String, String)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.entries.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.extend(additions.iter().cloned());
            next
        });
    }

    /// Removes every property.
    pub fn clear(&self) {
        self.entries.store(Arc::new(HashMap::new()));
    }

    /// Number of properties currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Copies the current contents.
    ///
    /// Useful for reading several keys from one consistent view: wrap the
    /// snapshot in a [`MapSource`](super::MapSource).
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        HashMap::clone(&self.entries.load())
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropertyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTable")
            .field("len", &self.len())
            .finish()
    }
}

/// Reads values from a [`PropertyTable`].
///
/// # Examples
///
/// ```
/// use propconf::source::{PropertySource, PropertyTable, ValueSource};
///
/// let table = PropertyTable::new();
/// let source = PropertySource::new(table.clone());
///
/// assert_eq!(source.lookup("spark.shuffle.io.numConnectionsPerPeer"), None);
/// table.set("spark.shuffle.io.numConnectionsPerPeer", "4");
/// assert_eq!(source.lookup("spark.shuffle.io.numConnectionsPerPeer").as_deref(), Some("4"));
/// ```
#[derive(Debug, Clone)]
pub struct PropertySource {
    table: PropertyTable,
}

impl PropertySource {
    /// Reads the given table.
    #[must_use]
    pub fn new(table: PropertyTable) -> Self {
        Self { table }
    }

    /// Reads the process-wide table.
    #[must_use]
    pub fn global() -> Self {
        Self::new(PropertyTable::global().clone())
    }

    /// The table this source reads.
    #[must_use]
    pub fn table(&self) -> &PropertyTable {
        &self.table
    }
}

impl ValueSource for PropertySource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.table.get(key)
    }

    fn name(&self) -> &str {
        "properties"
    }
}
