//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command and
//! assembles the provider they resolve keys through.

use crate::error::CliError;
use propconf::source::{EnvSource, FileSource, MapSource};
use propconf::{ConfigProvider, Logger};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Logger built from `--verbose`/`--quiet`/`PROPCONF_LOG_MODE`.
    pub logger: Logger,

    /// `--set` assignments, highest precedence.
    pub overrides: Vec<(String, String)>,

    /// `--file` paths, in precedence order.
    pub files: Vec<PathBuf>,

    /// Prefix for the environment source.
    pub env_prefix: Option<String>,

    /// Leave the environment out entirely.
    pub no_env: bool,
}

/// Parse a `KEY=VALUE` argument. The value may be empty or contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build the provider described by the global options.
///
/// Precedence (highest first):
/// 1. `--set` overrides
/// 2. `--file` files, in the order given
/// 3. Environment variables (unless `--no-env`)
pub fn build_provider(global: &GlobalOptions) -> Result<ConfigProvider, CliError> {
    let mut builder = ConfigProvider::builder();

    if !global.overrides.is_empty() {
        let overrides = MapSource::from_pairs(global.overrides.iter().cloned())
            .with_name("overrides");
        builder = builder.source(overrides);
    }

    for path in &global.files {
        let source = FileSource::load(path)?;
        global
            .logger
            .debug(&format!("loaded {} key(s) from {}", source.len(), path.display()));
        builder = builder.source(source);
    }

    if !global.no_env {
        let env = match &global.env_prefix {
            Some(prefix) => EnvSource::with_prefix(prefix.clone()),
            None => EnvSource::new(),
        };
        builder = builder.source(env);
    }

    let provider = builder.build();
    global.logger.debug(&format!(
        "resolving through {} source(s): {}",
        provider.len(),
        provider.source_names().join(", ")
    ));
    Ok(provider)
}
