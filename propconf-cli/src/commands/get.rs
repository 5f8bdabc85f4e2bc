//! Command to print the resolved value of a key.

use crate::error::CliError;
use crate::utils::{build_provider, GlobalOptions};
use clap::{Args, ValueEnum};
use propconf::{ByteSize, ConfigProvider, ConfigValue};
use std::time::Duration;

/// Type a value is parsed as before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Raw string, no parsing
    String,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// Floating point number
    Double,
    /// true or false
    Boolean,
    /// Time span such as 120s or 500ms (printed in milliseconds)
    Duration,
    /// Byte size such as 32k or 2m (printed in bytes)
    Bytes,
}

/// Print the resolved value of a key.
#[derive(Args)]
pub struct GetCommand {
    /// Key to resolve
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Parse the value as this type
    #[arg(long = "type", value_enum, default_value_t = ValueKind::String)]
    pub kind: ValueKind,

    /// Value to use when no source has the key
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let provider = build_provider(global)?;

        let rendered = match self.kind {
            ValueKind::String => match &self.default {
                Some(default) => provider.get_string_or(&self.key, default),
                None => provider.get_string(&self.key)?,
            },
            ValueKind::Int => self.resolve::<i32>(&provider)?.to_string(),
            ValueKind::Long => self.resolve::<i64>(&provider)?.to_string(),
            ValueKind::Double => self.resolve::<f64>(&provider)?.to_string(),
            ValueKind::Boolean => self.resolve::<bool>(&provider)?.to_string(),
            ValueKind::Duration => {
                format!("{}ms", self.resolve::<Duration>(&provider)?.as_millis())
            }
            ValueKind::Bytes => self.resolve::<ByteSize>(&provider)?.as_u64().to_string(),
        };

        if let Some(found) = provider.resolve(&self.key) {
            global
                .logger
                .debug(&format!("{} resolved from {}", self.key, found.source));
        } else {
            global.logger.debug(&format!("{} not configured", self.key));
        }

        println!("{rendered}");
        Ok(())
    }

    /// Typed lookup, with the `--default` value parsed as the same type.
    fn resolve<T: ConfigValue>(&self, provider: &ConfigProvider) -> Result<T, CliError> {
        match &self.default {
            Some(raw) => {
                let default = T::parse_value(raw).ok_or_else(|| {
                    CliError::InvalidArguments(format!(
                        "default '{raw}' is not a valid {}",
                        T::TYPE
                    ))
                })?;
                Ok(provider.get_parsed_or(&self.key, default)?)
            }
            None => Ok(provider.get_parsed(&self.key)?),
        }
    }
}
