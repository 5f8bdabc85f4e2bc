//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - Test environment setup with a temporary directory for config files
//! - Command builder helpers that isolate the process environment

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated directory for config files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// A command with only the propconf binary.
    ///
    /// Logging variables are removed so output does not depend on the
    /// caller's shell.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("propconf").expect("Failed to find propconf binary");
        cmd.env_remove("PROPCONF_LOG_MODE")
            .env_remove("PROPCONF_ENV_PREFIX");
        cmd
    }

    /// A command that ignores the environment source.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--no-env");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a config file into the environment and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }
}
