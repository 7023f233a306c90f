//! CLI argument parsing for flowtag.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use flowtag_core::lookup::RowPolicy;
use flowtag_core::Verbosity;
use thiserror::Error;

/// Default lookup table path.
pub const DEFAULT_LOOKUP: &str = "lookup.csv";

/// Default flow log path.
pub const DEFAULT_FLOW_LOG: &str = "flow_log.txt";

/// Default report path.
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("output path {0} would overwrite an input file")]
    OutputOverwritesInput(PathBuf),
}

/// Tag flow-log records by destination port and protocol.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "flowtag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub tag: TagArgs,

    /// Increase output verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }
}

/// Arguments for a tagging run.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TagArgs {
    /// Lookup table CSV (header, then dstport,protocol,tag rows).
    #[arg(short, long, default_value = DEFAULT_LOOKUP)]
    pub lookup: PathBuf,

    /// Flow log with one whitespace-delimited record per line.
    #[arg(short, long = "flow-log", default_value = DEFAULT_FLOW_LOG)]
    pub flow_log: PathBuf,

    /// Report output path. Replaced if it exists.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Skip lookup rows without exactly three fields instead of failing.
    #[arg(long)]
    pub skip_malformed: bool,
}

impl TagArgs {
    /// Validate the arguments.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.output == self.lookup || self.output == self.flow_log {
            return Err(CliError::OutputOverwritesInput(self.output.clone()));
        }
        Ok(())
    }

    /// Malformed lookup row handling selected by the flags.
    pub fn row_policy(&self) -> RowPolicy {
        if self.skip_malformed {
            RowPolicy::Skip
        } else {
            RowPolicy::Reject
        }
    }
}

impl Default for TagArgs {
    fn default() -> Self {
        Self {
            lookup: PathBuf::from(DEFAULT_LOOKUP),
            flow_log: PathBuf::from(DEFAULT_FLOW_LOG),
            output: PathBuf::from(DEFAULT_OUTPUT),
            skip_malformed: false,
        }
    }
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
