//! Command implementations for the propconf CLI.
//!
//! Each command is implemented in its own module with a consistent structure:
//! - A command struct with clap derive macros for argument parsing
//! - An `execute` method that performs the command's logic

pub mod check;
pub mod explain;
pub mod get;
pub mod transport;

pub use check::CheckCommand;
pub use explain::ExplainCommand;
pub use get::GetCommand;
pub use transport::TransportCommand;
