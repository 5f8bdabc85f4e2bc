//! The configuration provider: ordered sources plus typed access.
//!
//! A [`ConfigProvider`] holds a fixed, ordered list of
//! [`ValueSource`]s. Every lookup walks the list from the front and stops at
//! the first source that has a value; nothing is merged across sources and
//! nothing is cached, so a change to a mutable source is visible on the next
//! call.
//!
//! Accessors come in pairs:
//!
//! | required | defaulted | absent key | malformed value |
//! |---|---|---|---|
//! | `get_string` | `get_string_or` | `KeyNotFound` / default | n/a |
//! | `get_int` | `get_int_or` | `KeyNotFound` / default | `ValueMalformed` |
//! | `get_long` | `get_long_or` | `KeyNotFound` / default | `ValueMalformed` |
//! | `get_double` | `get_double_or` | `KeyNotFound` / default | `ValueMalformed` |
//! | `get_boolean` | `get_boolean_or` | `KeyNotFound` / default | `ValueMalformed` |
//! | `get_duration` | `get_duration_or` | `KeyNotFound` / default | `ValueMalformed` |
//! | `get_bytes` | `get_bytes_or` | `KeyNotFound` / default | `ValueMalformed` |
//!
//! A default only stands in for an absent key. A present value that fails
//! to parse is always an error.
//!
//! # Examples
//!
//! ```
//! use propconf::source::MapSource;
//! use propconf::ConfigProvider;
//!
//! let provider = ConfigProvider::builder()
//!     .source(MapSource::from_pairs([("a", "1")]))
//!     .source(MapSource::from_pairs([("a", "2"), ("b", "x")]))
//!     .build();
//!
//! assert_eq!(provider.get_string("a").unwrap(), "1");
//! assert_eq!(provider.get_string("b").unwrap(), "x");
//! assert!(provider.get_string("c").unwrap_err().is_not_found());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::source::{EnvSource, MapSource, PropertySource, ValueSource};
use crate::value::{ByteSize, ConfigValue};

/// A resolved value together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The raw value.
    pub value: String,
    /// Name of the answering source.
    pub source: String,
    /// Position of the answering source in precedence order (0 = highest).
    pub index: usize,
}

/// One source's answer for a key, as reported by [`ConfigProvider::trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAnswer {
    /// Name of the source.
    pub source: String,
    /// What the source holds for the key.
    pub value: Option<String>,
}

/// Resolves configuration keys through an ordered list of sources.
///
/// Cloning is cheap and the clone shares the same sources.
#[derive(Clone)]
pub struct ConfigProvider {
    sources: Arc<[Box<dyn ValueSource>]>,
}

impl ConfigProvider {
    /// Creates a provider over `sources`, highest precedence first.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn ValueSource>>) -> Self {
        Self {
            sources: sources.into(),
        }
    }

    /// Starts building a provider.
    #[must_use]
    pub fn builder() -> ConfigProviderBuilder {
        ConfigProviderBuilder::new()
    }

    /// The process-wide property table, then the environment.
    #[must_use]
    pub fn system() -> Self {
        Self::builder()
            .source(PropertySource::global())
            .source(EnvSource::new())
            .build()
    }

    /// Number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the provider has no sources (every key is absent).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names of the sources in precedence order.
    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// The raw value for `key` from the first source that has one.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.resolve(key).map(|resolved| resolved.value)
    }

    /// Like [`lookup`](Self::lookup), also naming the answering source.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<Resolved> {
        let hit = self
            .sources
            .iter()
            .enumerate()
            .find_map(|(index, source)| source.lookup(key).map(|value| (index, value)));

        match hit {
            Some((index, value)) => {
                let source = self.sources[index].name().to_string();
                log::trace!("'{key}' resolved by source #{index} ({source})");
                Some(Resolved {
                    value,
                    source,
                    index,
                })
            }
            None => {
                log::trace!("'{key}' not found in {} source(s)", self.sources.len());
                None
            }
        }
    }

    /// Every source's answer for `key`, in precedence order.
    ///
    /// Unlike [`resolve`](Self::resolve) this consults all sources; it is
    /// meant for diagnostics.
    #[must_use]
    pub fn trace(&self, key: &str) -> Vec<SourceAnswer> {
        self.sources
            .iter()
            .map(|source| SourceAnswer {
                source: source.name().to_string(),
                value: source.lookup(key),
            })
            .collect()
    }

    /// The value for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no source has a value.
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.lookup(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// The value for `key`, or `default` if no source has one.
    #[must_use]
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    /// The value for `key` parsed as `T`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if absent, [`Error::ValueMalformed`] if the
    /// value is not a valid `T`.
    pub fn get_parsed<T: ConfigValue>(&self, key: &str) -> Result<T> {
        let raw = self.get_string(key)?;
        parse_raw(key, &raw)
    }

    /// The value for `key` parsed as `T`, or `default` if absent.
    ///
    /// # Errors
    ///
    /// [`Error::ValueMalformed`] if a value is present but not a valid `T`.
    pub fn get_parsed_or<T: ConfigValue>(&self, key: &str, default: T) -> Result<T> {
        match self.lookup(key) {
            Some(raw) => parse_raw(key, &raw),
            None => Ok(default),
        }
    }

    /// The value for `key` as an `i32`.
    ///
    /// # Errors
    ///
    /// See [`get_parsed`](Self::get_parsed).
    pub fn get_int(&self, key: &str) -> Result<i32> {
        self.get_parsed(key)
    }

    /// The value for `key` as an `i32`, or `default` if absent.
    ///
    /// # Errors
    ///
    /// See [`get_parsed_or`](Self::get_parsed_or).
    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as an `i64`.
    ///
    /// # Errors
    ///
    /// See [`get_parsed`](Self::get_parsed).
    pub fn get_long(&self, key: &str) -> Result<i64> {
        self.get_parsed(key)
    }

    /// The value for `key` as an `i64`, or `default` if absent.
    ///
    /// # Errors
    ///
    /// See [`get_parsed_or`](Self::get_parsed_or).
    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as an `f64`.
    ///
    /// # Errors
    ///
    /// See [`get_parsed`](Self::get_parsed).
    pub fn get_double(&self, key: &str) -> Result<f64> {
        self.get_parsed(key)
    }

    /// The value for `key` as an `f64`, or `default` if absent.
    ///
    /// # Errors
    ///
    /// See [`get_parsed_or`](Self::get_parsed_or).
    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as a `bool` (`true`/`false`, any ASCII case).
    ///
    /// # Errors
    ///
    /// See [`get_parsed`](Self::get_parsed).
    pub fn get_boolean(&self, key: &str) -> Result<bool> {
        self.get_parsed(key)
    }

    /// The value for `key` as a `bool`, or `default` if absent.
    ///
    /// # Errors
    ///
    /// See [`get_parsed_or`](Self::get_parsed_or).
    pub fn get_boolean_or(&self, key: &str, default: bool) -> Result<bool> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as a time string (`120s`, `5ms`, ...). Bare
    /// numbers are seconds.
    ///
    /// # Errors
    ///
    /// See [`get_parsed`](Self::get_parsed).
    pub fn get_duration(&self, key: &str) -> Result<Duration> {
        self.get_parsed(key)
    }

    /// The value for `key` as a time string, or `default` if absent.
    ///
    /// # Errors
    ///
    /// See [`get_parsed_or`](Self::get_parsed_or).
    pub fn get_duration_or(&self, key: &str, default: Duration) -> Result<Duration> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as a byte size (`32k`, `2m`, ...), in bytes.
    ///
    /// # Errors
    ///
    /// See [`get_parsed`](Self::get_parsed).
    pub fn get_bytes(&self, key: &str) -> Result<u64> {
        self.get_parsed::<ByteSize>(key).map(ByteSize::as_u64)
    }

    /// The value for `key` as a byte size, or `default` bytes if absent.
    ///
    /// # Errors
    ///
    /// See [`get_parsed_or`](Self::get_parsed_or).
    pub fn get_bytes_or(&self, key: &str, default: u64) -> Result<u64> {
        self.get_parsed_or(key, ByteSize(default))
            .map(ByteSize::as_u64)
    }

    /// Checks that every key in `keys` resolves.
    ///
    /// Intended for startup: all missing keys are reported together.
    ///
    /// # Errors
    ///
    /// [`Error::KeysNotFound`] naming each missing key in input order.
    pub fn require_all<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let missing: Vec<String> = keys
            .into_iter()
            .filter(|key| self.lookup(key.as_ref()).is_none())
            .map(|key| key.as_ref().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::KeysNotFound { keys: missing })
        }
    }
}

impl fmt::Debug for ConfigProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigProvider")
            .field("sources", &self.source_names())
            .finish()
    }
}

fn parse_raw<T: ConfigValue>(key: &str, raw: &str) -> Result<T> {
    T::parse_value(raw).ok_or_else(|| Error::malformed(key, raw, T::TYPE))
}

/// Builder for [`ConfigProvider`].
///
/// Sources are consulted in the order they are added. Defaults, if any, are
/// always consulted last.
///
/// # Examples
///
/// ```
/// use propconf::source::{MapSource, PropertySource, PropertyTable};
/// use propconf::ConfigProvider;
///
/// let table = PropertyTable::new();
/// table.set("spark.shuffle.io.maxRetries", "5");
///
/// let provider = ConfigProvider::builder()
///     .source(PropertySource::new(table))
///     .defaults([("spark.shuffle.io.maxRetries", "3"), ("spark.shuffle.io.mode", "NIO")])
///     .build();
///
/// assert_eq!(provider.get_int("spark.shuffle.io.maxRetries").unwrap(), 5);
/// assert_eq!(provider.get_string("spark.shuffle.io.mode").unwrap(), "NIO");
/// ```
#[derive(Default)]
pub struct ConfigProviderBuilder {
    sources: Vec<Box<dyn ValueSource>>,
    defaults: Option<MapSource>,
}

impl ConfigProviderBuilder {
    /// Creates a builder with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source below those already added.
    #[must_use]
    pub fn source(mut self, source: impl ValueSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Appends an already boxed source.
    #[must_use]
    pub fn boxed_source(mut self, source: Box<dyn ValueSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds fallback values consulted after every other source.
    ///
    /// Calling this more than once adds to the same defaults table.
    #[must_use]
    pub fn defaults<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let defaults = self
            .defaults
            .get_or_insert_with(|| MapSource::new().with_name("defaults"));
        for (key, value) in entries {
            defaults.insert(key, value);
        }
        self
    }

    /// Builds the provider.
    #[must_use]
    pub fn build(mut self) -> ConfigProvider {
        if let Some(defaults) = self.defaults.take() {
            self.sources.push(Box::new(defaults));
        }
        ConfigProvider::new(self.sources)
    }
}
