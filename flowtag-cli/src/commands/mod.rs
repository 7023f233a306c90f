//! Command orchestration.
//!
//! `tag` runs the whole pipeline: load lookup table, classify flow log,
//! write report.

pub mod tag;

pub use tag::{execute_tag, TagResult};

use crate::cli::CliError;
use crate::io::{FlowLogError, LookupLoadError, ReportWriterError};
use thiserror::Error;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("lookup error: {0}")]
    Lookup(#[from] LookupLoadError),

    #[error("flow log error: {0}")]
    FlowLog(#[from] FlowLogError),

    #[error("output error: {0}")]
    Output(#[from] ReportWriterError),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;
