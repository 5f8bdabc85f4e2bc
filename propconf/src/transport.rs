//! Typed view of the network transport settings.
//!
//! The transport layer is configured per module (`shuffle`, `rpc`, ...) with
//! keys of the form `spark.<module>.io.<setting>`. [`TransportConf`] wraps a
//! [`ConfigProvider`] and exposes each setting with its type and default.
//! It reads through the provider on every call, so it never holds stale
//! values.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, ValueType};
use crate::provider::ConfigProvider;
use crate::value::{ByteSize, ConfigValue};

/// Key consulted for the connection timeout when the module sets none.
pub const NETWORK_TIMEOUT_KEY: &str = "spark.network.timeout";

/// Key for the memory-map threshold, shared by every module.
pub const MEMORY_MAP_THRESHOLD_KEY: &str = "spark.storage.memoryMapThreshold";

const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_SASL_RTT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_IO_RETRY_WAIT: Duration = Duration::from_secs(5);
const DEFAULT_MEMORY_MAP_THRESHOLD: u64 = 2 * 1024 * 1024;

/// Socket I/O implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IoMode {
    /// Portable non-blocking I/O.
    #[default]
    Nio,
    /// Linux epoll.
    Epoll,
}

impl fmt::Display for IoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nio => write!(f, "NIO"),
            Self::Epoll => write!(f, "EPOLL"),
        }
    }
}

impl ConfigValue for IoMode {
    const TYPE: ValueType = ValueType::Choice("io mode (NIO or EPOLL)");

    fn parse_value(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("nio") {
            Some(Self::Nio)
        } else if raw.eq_ignore_ascii_case("epoll") {
            Some(Self::Epoll)
        } else {
            None
        }
    }
}

/// Transport settings for one module.
///
/// # Examples
///
/// ```
/// use propconf::source::MapSource;
/// use propconf::{ConfigProvider, IoMode, TransportConf};
/// use std::time::Duration;
///
/// let provider = ConfigProvider::builder()
///     .source(MapSource::from_pairs([
///         ("spark.shuffle.io.mode", "epoll"),
///         ("spark.network.timeout", "300s"),
///     ]))
///     .build();
/// let conf = TransportConf::new("shuffle", provider);
///
/// assert_eq!(conf.io_mode().unwrap(), IoMode::Epoll);
/// assert_eq!(conf.connection_timeout().unwrap(), Duration::from_secs(300));
/// assert_eq!(conf.max_io_retries().unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TransportConf {
    module: String,
    provider: ConfigProvider,
}

impl TransportConf {
    /// Creates a view of `module`'s settings.
    #[must_use]
    pub fn new(module: impl Into<String>, provider: ConfigProvider) -> Self {
        Self {
            module: module.into(),
            provider,
        }
    }

    /// The module name.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &ConfigProvider {
        &self.provider
    }

    /// The full key for an `io.*` setting of this module.
    #[must_use]
    pub fn io_key(&self, setting: &str) -> String {
        format!("spark.{}.io.{setting}", self.module)
    }

    /// `spark.<module>.io.mode`, default `NIO`.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` for anything but `NIO`/`EPOLL` (any case).
    pub fn io_mode(&self) -> Result<IoMode> {
        self.provider
            .get_parsed_or(&self.io_key("mode"), IoMode::default())
    }

    /// `spark.<module>.io.preferDirectBufs`, default `true`.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not a boolean.
    pub fn prefer_direct_bufs(&self) -> Result<bool> {
        self.provider
            .get_boolean_or(&self.io_key("preferDirectBufs"), true)
    }

    /// `spark.<module>.io.connectionTimeout`, falling back to
    /// `spark.network.timeout`, default 120s.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if whichever key answers is not a time string.
    pub fn connection_timeout(&self) -> Result<Duration> {
        let key = self.connection_timeout_key();
        self.provider
            .get_duration_or(&key, DEFAULT_CONNECTION_TIMEOUT)
    }

    /// The key [`connection_timeout`](Self::connection_timeout) reads: the
    /// module key when it is set, otherwise `spark.network.timeout`.
    #[must_use]
    pub fn connection_timeout_key(&self) -> String {
        let key = self.io_key("connectionTimeout");
        if self.provider.lookup(&key).is_some() {
            key
        } else {
            NETWORK_TIMEOUT_KEY.to_string()
        }
    }

    /// `spark.<module>.io.numConnectionsPerPeer`, default 1.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn num_connections_per_peer(&self) -> Result<i32> {
        self.provider
            .get_int_or(&self.io_key("numConnectionsPerPeer"), 1)
    }

    /// `spark.<module>.io.backLog`, default -1 (use the OS default).
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn backlog(&self) -> Result<i32> {
        self.provider.get_int_or(&self.io_key("backLog"), -1)
    }

    /// `spark.<module>.io.serverThreads`, default 0 (one per core).
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn server_threads(&self) -> Result<i32> {
        self.provider.get_int_or(&self.io_key("serverThreads"), 0)
    }

    /// `spark.<module>.io.clientThreads`, default 0 (one per core).
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn client_threads(&self) -> Result<i32> {
        self.provider.get_int_or(&self.io_key("clientThreads"), 0)
    }

    /// `spark.<module>.io.receiveBuffer`, default -1 (use the OS default).
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn receive_buffer(&self) -> Result<i32> {
        self.provider.get_int_or(&self.io_key("receiveBuffer"), -1)
    }

    /// `spark.<module>.io.sendBuffer`, default -1 (use the OS default).
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn send_buffer(&self) -> Result<i32> {
        self.provider.get_int_or(&self.io_key("sendBuffer"), -1)
    }

    /// `spark.<module>.sasl.timeout`, default 30s.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not a time string.
    pub fn sasl_rtt_timeout(&self) -> Result<Duration> {
        let key = format!("spark.{}.sasl.timeout", self.module);
        self.provider.get_duration_or(&key, DEFAULT_SASL_RTT_TIMEOUT)
    }

    /// `spark.<module>.io.maxRetries`, default 3.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not an int.
    pub fn max_io_retries(&self) -> Result<i32> {
        self.provider.get_int_or(&self.io_key("maxRetries"), 3)
    }

    /// `spark.<module>.io.retryWait`, default 5s.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not a time string.
    pub fn io_retry_wait(&self) -> Result<Duration> {
        self.provider
            .get_duration_or(&self.io_key("retryWait"), DEFAULT_IO_RETRY_WAIT)
    }

    /// `spark.<module>.io.lazyFD`, default `true`.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not a boolean.
    pub fn lazy_file_descriptor(&self) -> Result<bool> {
        self.provider.get_boolean_or(&self.io_key("lazyFD"), true)
    }

    /// `spark.storage.memoryMapThreshold`, default 2 MiB.
    ///
    /// # Errors
    ///
    /// `ValueMalformed` if the value is not a byte size.
    pub fn memory_map_threshold(&self) -> Result<u64> {
        self.provider
            .get_bytes_or(MEMORY_MAP_THRESHOLD_KEY, DEFAULT_MEMORY_MAP_THRESHOLD)
    }

    /// Reads every setting at once.
    ///
    /// # Errors
    ///
    /// The first `ValueMalformed` encountered.
    pub fn snapshot(&self) -> Result<TransportSettings> {
        Ok(TransportSettings {
            module: self.module.clone(),
            io_mode: self.io_mode()?,
            prefer_direct_bufs: self.prefer_direct_bufs()?,
            connection_timeout_ms: millis(self.connection_timeout()?),
            num_connections_per_peer: self.num_connections_per_peer()?,
            backlog: self.backlog()?,
            server_threads: self.server_threads()?,
            client_threads: self.client_threads()?,
            receive_buffer: self.receive_buffer()?,
            send_buffer: self.send_buffer()?,
            sasl_rtt_timeout_ms: millis(self.sasl_rtt_timeout()?),
            max_io_retries: self.max_io_retries()?,
            io_retry_wait_ms: millis(self.io_retry_wait()?),
            lazy_file_descriptor: self.lazy_file_descriptor()?,
            memory_map_threshold: ByteSize(self.memory_map_threshold()?),
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Every transport setting for one module, read at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TransportSettings {
    pub module: String,
    pub io_mode: IoMode,
    pub prefer_direct_bufs: bool,
    pub connection_timeout_ms: u64,
    pub num_connections_per_peer: i32,
    pub backlog: i32,
    pub server_threads: i32,
    pub client_threads: i32,
    pub receive_buffer: i32,
    pub send_buffer: i32,
    pub sasl_rtt_timeout_ms: u64,
    pub max_io_retries: i32,
    pub io_retry_wait_ms: u64,
    pub lazy_file_descriptor: bool,
    pub memory_map_threshold: ByteSize,
}
