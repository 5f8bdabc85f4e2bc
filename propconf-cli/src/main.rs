//! Main entry point for the propconf CLI.
//!
//! Resolves configuration keys through a stack of sources built from the
//! global options (`--set`, `--file`, environment):
//! - `get`: Print the resolved value of a key
//! - `explain`: Show every source's answer for a key
//! - `check`: Verify that required keys are configured
//! - `transport`: Print the transport settings of a module

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Usage errors exit with 4; clap's own code 2 means "key not found" here
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 4 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize logging based on verbosity
    let logger = propconf::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        logger,
        overrides: cli.overrides,
        files: cli.files,
        env_prefix: cli.env_prefix,
        no_env: cli.no_env,
    };

    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Explain(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Transport(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
