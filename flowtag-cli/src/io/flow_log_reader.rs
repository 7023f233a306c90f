//! Flow log reader.

use std::path::Path;

use flowtag_core::{classify_lines, Classification, Logger, LookupTable};
use flowtag_fs::{Filesystem, FsError};
use thiserror::Error;

/// Errors from flow log reading.
#[derive(Debug, Error)]
pub enum FlowLogError {
    #[error("failed to read flow log {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: FsError,
    },
}

/// Read a flow log and classify every line against `table`.
pub fn read_flow_log<F, L>(
    fs: &F,
    path: &Path,
    table: &LookupTable,
    logger: &L,
) -> Result<Classification, FlowLogError>
where
    F: Filesystem,
    L: Logger + ?Sized,
{
    let content = fs.read_file(path).map_err(|e| FlowLogError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let classification = classify_lines(content.lines(), table, logger);

    logger.verbose(&format!(
        "Classified {} records from {} ({} skipped, {} unknown protocol)",
        classification.valid_lines,
        path.display(),
        classification.skipped_lines,
        classification.unknown_protocol_lines
    ));

    Ok(classification)
}
