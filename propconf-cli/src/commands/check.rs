//! Command to verify that required keys are configured.

use crate::error::CliError;
use crate::utils::{build_provider, GlobalOptions};
use clap::Args;

/// Verify that required keys are configured.
#[derive(Args)]
pub struct CheckCommand {
    /// Keys that must resolve
    #[arg(value_name = "KEY", required = true)]
    pub keys: Vec<String>,
}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let provider = build_provider(global)?;
        provider.require_all(&self.keys)?;

        global
            .logger
            .info(&format!("all {} key(s) configured", self.keys.len()));
        Ok(())
    }
}
