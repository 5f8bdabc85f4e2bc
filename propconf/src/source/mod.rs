//! Value sources: single backing stores answering key lookups.
//!
//! A [`ValueSource`] knows one medium (a property table, an explicit map,
//! the process environment, a parsed file) and answers one question: does
//! key K have a value here, and if so what is it as a string? Absence is an
//! ordinary `None`, never an error. Policy (precedence, typing, required vs.
//! defaulted) lives in [`crate::ConfigProvider`].
//!
//! # Available sources
//!
//! - [`PropertySource`]: reads a [`PropertyTable`], by default the
//!   process-wide one
//! - [`MapSource`]: an explicit, optionally shared, mapping
//! - [`EnvSource`]: environment variables, with optional prefix mapping
//! - [`FileSource`]: a YAML or `.properties` file read once at construction
//!
//! # Examples
//!
//! ```
//! use propconf::source::{MapSource, ValueSource};
//!
//! let source = MapSource::from_pairs([("spark.shuffle.io.mode", "EPOLL")]);
//! assert_eq!(source.lookup("spark.shuffle.io.mode").as_deref(), Some("EPOLL"));
//! assert_eq!(source.lookup("spark.shuffle.io.backLog"), None);
//! ```

pub mod environment;
pub mod file;
pub mod map;
pub mod properties;

use std::sync::Arc;

pub use environment::EnvSource;
pub use file::{FileFormat, FileSource};
pub use map::MapSource;
pub use properties::{PropertySource, PropertyTable};

/// A single backing store for configuration values.
///
/// Implementations must be cheap to query, must not block, and must report
/// a missing key as `None`. They are shared across threads by the provider,
/// hence the `Send + Sync` bound.
pub trait ValueSource: Send + Sync {
    /// Looks up the raw string value for `key`.
    fn lookup(&self, key: &str) -> Option<String>;

    /// A short label used in diagnostics and provenance reports.
    fn name(&self) -> &str {
        "source"
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Arc<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl ValueSource for Fixed {
        fn lookup(&self, key: &str) -> Option<String> {
            (key == "k").then(|| "v".to_string())
        }
    }

    #[test]
    fn test_default_name() {
        assert_eq!(Fixed.name(), "source");
    }

    #[test]
    fn test_arc_and_box_forward() {
        let shared: Arc<dyn ValueSource> = Arc::new(Fixed);
        let boxed: Box<dyn ValueSource> = Box::new(Fixed);
        assert_eq!(shared.lookup("k").as_deref(), Some("v"));
        assert_eq!(boxed.lookup("k").as_deref(), Some("v"));
        assert_eq!(boxed.lookup("other"), None);
    }

    #[test]
    fn test_arc_keeps_inner_name() {
        let map = Arc::new(MapSource::new().with_name("overrides"));
        assert_eq!(ValueSource::name(&map), "overrides");
    }
}
