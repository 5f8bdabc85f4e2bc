//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CheckCommand, ExplainCommand, GetCommand, TransportCommand};
use crate::utils::parse_assignment;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve configuration keys through layered sources.
#[derive(Parser)]
#[command(name = "propconf")]
#[command(version, about = "Resolve layered configuration values", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Set a value with the highest precedence (repeatable)
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        global = true,
        value_parser = parse_assignment
    )]
    pub overrides: Vec<(String, String)>,

    /// Read values from a YAML or .properties file (repeatable, earlier wins)
    #[arg(long = "file", value_name = "PATH", global = true)]
    pub files: Vec<PathBuf>,

    /// Read environment variables named PREFIX + upper-cased key
    #[arg(long, value_name = "PREFIX", global = true, env = "PROPCONF_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    /// Do not consult environment variables (overrides --env-prefix)
    #[arg(long, global = true)]
    pub no_env: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved value of a key
    Get(GetCommand),

    /// Show every source's answer for a key
    Explain(ExplainCommand),

    /// Verify that required keys are configured
    Check(CheckCommand),

    /// Print the transport settings of a module
    Transport(TransportCommand),
}
