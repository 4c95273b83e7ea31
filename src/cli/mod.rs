//! CLI module for stack-status
//!
//! Provides command-line interface for:
//! - serve: HTTP status page
//! - render: one-shot page render

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ProbeArgs};
pub use commands::{discover_inventory, render, run, run_command, serve, write_page};
pub use errors::{CliError, CliErrorCode, CliResult};
