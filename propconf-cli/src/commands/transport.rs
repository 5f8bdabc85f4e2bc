//! Command to print the transport settings of a module.

use crate::error::CliError;
use crate::utils::{build_provider, GlobalOptions};
use clap::{Args, ValueEnum};
use propconf::transport::MEMORY_MAP_THRESHOLD_KEY;
use propconf::{TransportConf, TransportSettings};

/// Output format for the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key value` line per setting
    Text,
    /// Pretty-printed JSON object
    Json,
}

/// Print the transport settings of a module.
#[derive(Args)]
pub struct TransportCommand {
    /// Module name, such as shuffle or rpc
    #[arg(value_name = "MODULE")]
    pub module: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl TransportCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.module.is_empty() || self.module.contains(char::is_whitespace) {
            return Err(CliError::InvalidArguments(format!(
                "invalid module name '{}'",
                self.module
            )));
        }

        let provider = build_provider(global)?;
        let conf = TransportConf::new(self.module, provider);
        let settings = conf.snapshot()?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
            OutputFormat::Text => print!("{}", render_text(&conf, &settings)),
        }
        Ok(())
    }
}

fn render_text(conf: &TransportConf, s: &TransportSettings) -> String {
    let rows = [
        (conf.io_key("mode"), s.io_mode.to_string()),
        (conf.io_key("preferDirectBufs"), s.prefer_direct_bufs.to_string()),
        (conf.connection_timeout_key(), format!("{}ms", s.connection_timeout_ms)),
        (
            conf.io_key("numConnectionsPerPeer"),
            s.num_connections_per_peer.to_string(),
        ),
        (conf.io_key("backLog"), s.backlog.to_string()),
        (conf.io_key("serverThreads"), s.server_threads.to_string()),
        (conf.io_key("clientThreads"), s.client_threads.to_string()),
        (conf.io_key("receiveBuffer"), s.receive_buffer.to_string()),
        (conf.io_key("sendBuffer"), s.send_buffer.to_string()),
        (
            format!("spark.{}.sasl.timeout", conf.module()),
            format!("{}ms", s.sasl_rtt_timeout_ms),
        ),
        (conf.io_key("maxRetries"), s.max_io_retries.to_string()),
        (conf.io_key("retryWait"), format!("{}ms", s.io_retry_wait_ms)),
        (conf.io_key("lazyFD"), s.lazy_file_descriptor.to_string()),
        (
            MEMORY_MAP_THRESHOLD_KEY.to_string(),
            s.memory_map_threshold.to_string(),
        ),
    ];

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{key:<width$}  {value}\n"))
        .collect()
}
