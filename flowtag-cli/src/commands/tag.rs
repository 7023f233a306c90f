//! Tag command orchestration.

use std::path::PathBuf;

use flowtag_core::{Logger, Report};
use flowtag_fs::Filesystem;

use crate::cli::TagArgs;
use crate::io::{load_lookup_table, read_flow_log, ReportWriter};

use super::CommandResult;

/// Result of a tagging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResult {
    /// Path to the written report.
    pub output_path: PathBuf,
    /// Entries in the lookup table.
    pub lookup_entries: usize,
    /// Flow records classified.
    pub records: u64,
    /// Flow-log lines skipped for having too few fields.
    pub skipped: u64,
    /// Records with an unrecognised protocol number.
    pub unknown_protocol: u64,
}

/// Execute a tagging run.
///
/// The report is only written once both inputs have been read and
/// classified, so a failure leaves any existing output untouched.
pub fn execute_tag<F, L>(args: &TagArgs, fs: &F, logger: &L) -> CommandResult<TagResult>
where
    F: Filesystem,
    L: Logger + ?Sized,
{
    args.validate()?;

    let table = load_lookup_table(fs, &args.lookup, args.row_policy(), logger)?;
    let classification = read_flow_log(fs, &args.flow_log, &table, logger)?;

    let report = Report::generate(&classification);
    let output_path = ReportWriter::new(fs, &args.output).write(&report)?;

    logger.debug(&format!(
        "Wrote {} bytes to {}",
        report.content.len(),
        output_path.display()
    ));

    Ok(TagResult {
        output_path,
        lookup_entries: table.len(),
        records: classification.valid_lines,
        skipped: classification.skipped_lines,
        unknown_protocol: classification.unknown_protocol_lines,
    })
}
