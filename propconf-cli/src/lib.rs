//! Library exports for propconf-cli.
//!
//! This module exports the CLI structure so the command definitions can be
//! reused for documentation and tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
