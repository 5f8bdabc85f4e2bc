//! Error types for the propconf library.
//!
//! This module provides the error hierarchy for configuration resolution,
//! using `thiserror` for ergonomic error handling.
//!
//! Absence and malformation are separate variants on purpose: a key that no
//! source knows about is [`Error::KeyNotFound`], while a key that resolved to
//! a value the caller could not parse is [`Error::ValueMalformed`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a propconf error.
///
/// # Examples
///
/// ```
/// use propconf::{Error, Result};
///
/// fn example_lookup() -> Result<i32> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the propconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// No configured source produced a value for a required key.
    #[error("no value configured for key '{key}'")]
    KeyNotFound {
        /// The key that was requested.
        key: String,
    },

    /// A value was found but could not be parsed into the requested type.
    #[error("value '{raw}' for key '{key}' is not a valid {expected}")]
    ValueMalformed {
        /// The key whose value was malformed.
        key: String,
        /// The raw string value as it was resolved.
        raw: String,
        /// The type the caller asked for.
        expected: ValueType,
    },

    /// One or more required keys were missing.
    #[error("no value configured for required key(s): {}", keys.join(", "))]
    KeysNotFound {
        /// Every missing key, in the order they were checked.
        keys: Vec<String>,
    },

    /// A configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("parse error in {} at line {line}: {message}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// One-based line number, or 0 when the parser gave none.
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

/// The target type of a typed lookup.
///
/// Carried by [`Error::ValueMalformed`] so callers can report what was
/// expected without access to the source code that made the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// A plain string (never malformed).
    String,
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit signed integer.
    Long,
    /// A 64-bit float.
    Double,
    /// `true` or `false`.
    Boolean,
    /// A time string such as `120s` or `5ms`.
    Duration,
    /// A byte-size string such as `32k` or `2m`.
    ByteSize,
    /// One of a fixed set of named values.
    Choice(&'static str),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Double => write!(f, "double"),
            Self::Boolean => write!(f, "boolean"),
            Self::Duration => write!(f, "duration"),
            Self::ByteSize => write!(f, "byte size"),
            Self::Choice(name) => write!(f, "{name}"),
        }
    }
}

impl Error {
    /// Builds a [`Error::ValueMalformed`] from borrowed parts.
    pub(crate) fn malformed(key: &str, raw: &str, expected: ValueType) -> Self {
        Self::ValueMalformed {
            key: key.to_string(),
            raw: raw.to_string(),
            expected,
        }
    }

    /// Check if error indicates a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use propconf::Error;
    ///
    /// let err = Error::KeyNotFound { key: "spark.shuffle.io.mode".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::KeysNotFound { .. })
    }

    /// Check if error indicates a value that failed to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use propconf::{Error, ValueType};
    ///
    /// let err = Error::ValueMalformed {
    ///     key: "flag".into(),
    ///     raw: "maybe".into(),
    ///     expected: ValueType::Boolean,
    /// };
    /// assert!(err.is_malformed());
    /// assert!(!err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::ValueMalformed { .. })
    }
}
