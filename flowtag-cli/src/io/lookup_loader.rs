//! Lookup table loader.
//!
//! Reads the lookup CSV through the [`Filesystem`] trait and parses it with
//! [`parse_lookup_table_with`]. Skipped rows are reported as warnings.

use std::path::Path;

use flowtag_core::lookup::{parse_lookup_table_with, LookupError, RowPolicy};
use flowtag_core::{Logger, LookupTable};
use flowtag_fs::{Filesystem, FsError};
use thiserror::Error;

/// Errors from lookup table loading.
#[derive(Debug, Error)]
pub enum LookupLoadError {
    #[error("failed to read lookup table {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: FsError,
    },

    #[error("invalid lookup table {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: LookupError,
    },
}

/// Load a lookup table from a file.
pub fn load_lookup_table<F, L>(
    fs: &F,
    path: &Path,
    policy: RowPolicy,
    logger: &L,
) -> Result<LookupTable, LookupLoadError>
where
    F: Filesystem,
    L: Logger + ?Sized,
{
    let content = fs.read_file(path).map_err(|e| LookupLoadError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let parsed = parse_lookup_table_with(&content, policy).map_err(|e| LookupLoadError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    for row in &parsed.skipped {
        logger.warn(&format!(
            "Warning: Skipping malformed lookup row on line {} ({} fields)",
            row.line, row.fields
        ));
    }

    logger.verbose(&format!(
        "Loaded {} lookup entries from {}",
        parsed.table.len(),
        path.display()
    ));

    Ok(parsed.table)
}
