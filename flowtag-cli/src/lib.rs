//! flowtag CLI.
//!
//! Argument parsing, file IO and orchestration around `flowtag-core`.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod io;

pub use cli::{parse_from, Cli, CliError, TagArgs, DEFAULT_FLOW_LOG, DEFAULT_LOOKUP, DEFAULT_OUTPUT};
pub use commands::{execute_tag, CommandError, CommandResult, TagResult};
