#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # propconf
//!
//! Layered, typed configuration resolution.
//!
//! A [`ConfigProvider`] consults an ordered list of value sources (a
//! process-wide property table, explicit maps, the environment, files) and
//! returns the first value found, parsed into the type the caller asks for.
//! Missing required keys and unparseable values fail fast with distinct
//! errors.
//!
//! ## Core Types
//!
//! - [`ConfigProvider`] and [`ConfigProviderBuilder`]: precedence and typed access
//! - [`source::ValueSource`] and its implementations in [`source`]
//! - [`TransportConf`]: typed view of per-module network transport settings
//! - [`StageInfo`]: read-only stage progress snapshot for monitoring
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use propconf::source::{MapSource, PropertySource, PropertyTable};
//! use propconf::ConfigProvider;
//!
//! let properties = PropertyTable::new();
//! properties.set("spark.shuffle.io.numConnectionsPerPeer", "2");
//!
//! let provider = ConfigProvider::builder()
//!     .source(PropertySource::new(properties))
//!     .source(MapSource::from_pairs([("spark.shuffle.io.mode", "EPOLL")]))
//!     .build();
//!
//! assert_eq!(provider.get_int("spark.shuffle.io.numConnectionsPerPeer").unwrap(), 2);
//! assert_eq!(provider.get_string("spark.shuffle.io.mode").unwrap(), "EPOLL");
//! assert_eq!(provider.get_int_or("spark.shuffle.io.backLog", -1).unwrap(), -1);
//! ```

pub mod error;
pub mod logging;
pub mod provider;
pub mod source;
pub mod stage;
pub mod transport;
pub mod value;

#[cfg(test)]
mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result, ValueType};
pub use logging::{init_logger, LogLevel, Logger};
pub use provider::{ConfigProvider, ConfigProviderBuilder, Resolved, SourceAnswer};
pub use stage::StageInfo;
pub use transport::{IoMode, TransportConf, TransportSettings};
pub use value::{ByteSize, ConfigValue};
