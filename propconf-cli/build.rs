//! Build script for propconf-cli.
//!
//! Renders the `propconf.1` man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("propconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered configuration values")
        .long_about(
            "Resolve configuration keys through --set overrides, files and the environment, \
             in that order of precedence",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("Set a value with the highest precedence (repeatable)")
                .value_name("KEY=VALUE")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .help("Read values from a YAML or .properties file (repeatable, earlier wins)")
                .value_name("PATH")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("env-prefix")
                .long("env-prefix")
                .help("Read environment variables named PREFIX + upper-cased key")
                .value_name("PREFIX")
                .global(true)
                .env("PROPCONF_ENV_PREFIX"),
        )
        .arg(
            Arg::new("no-env")
                .long("no-env")
                .help("Do not consult environment variables")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Print the resolved value of a key")
                .long_about("Print the value of a key, optionally parsed as a type with a default")
                .arg(Arg::new("KEY").help("Key to resolve").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("Parse the value as this type")
                        .value_name("TYPE")
                        .value_parser([
                            "string", "int", "long", "double", "boolean", "duration", "bytes",
                        ])
                        .default_value("string"),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .help("Value to use when no source has the key")
                        .value_name("VALUE"),
                ),
            Command::new("explain")
                .about("Show every source's answer for a key")
                .long_about("List each source in precedence order and mark the one that wins")
                .arg(Arg::new("KEY").help("Key to explain").required(true)),
            Command::new("check")
                .about("Verify that required keys are configured")
                .long_about("Exit with status 2 and name the missing keys if any key is unset")
                .arg(
                    Arg::new("KEY")
                        .help("Keys that must resolve")
                        .required(true)
                        .num_args(1..),
                ),
            Command::new("transport")
                .about("Print the transport settings of a module")
                .long_about("Print the network transport settings of a module as text or JSON")
                .arg(
                    Arg::new("MODULE")
                        .help("Module name, such as shuffle or rpc")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format")
                        .value_name("FORMAT")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("propconf.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
