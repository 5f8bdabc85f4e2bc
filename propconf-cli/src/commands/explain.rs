//! Command to show how a key resolves across the source stack.

use crate::error::CliError;
use crate::utils::{build_provider, GlobalOptions};
use clap::Args;
use propconf::Error;

/// Show every source's answer for a key.
#[derive(Args)]
pub struct ExplainCommand {
    /// Key to explain
    #[arg(value_name = "KEY")]
    pub key: String,
}

impl ExplainCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let provider = build_provider(global)?;
        let answers = provider.trace(&self.key);

        let width = answers
            .iter()
            .map(|answer| answer.source.len())
            .max()
            .unwrap_or(0);
        let winner = answers.iter().position(|answer| answer.value.is_some());

        println!("{}", self.key);
        for (index, answer) in answers.iter().enumerate() {
            let marker = if Some(index) == winner { '*' } else { ' ' };
            let value = match &answer.value {
                Some(value) => format!("= {value}"),
                None => "(unset)".to_string(),
            };
            println!("{marker} {:<width$}  {value}", answer.source);
        }

        if winner.is_none() {
            return Err(Error::KeyNotFound { key: self.key }.into());
        }
        Ok(())
    }
}
