//! Report writer.
//!
//! Writes the rendered report atomically, replacing any existing file.

use std::path::{Path, PathBuf};

use flowtag_core::Report;
use flowtag_fs::{Filesystem, FsError};
use thiserror::Error;

/// Errors from report writing.
#[derive(Debug, Error)]
pub enum ReportWriterError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: FsError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: FsError,
    },
}

/// Writes reports to a single output path.
pub struct ReportWriter<'a, F: Filesystem> {
    fs: &'a F,
    path: &'a Path,
}

impl<'a, F: Filesystem> ReportWriter<'a, F> {
    pub fn new(fs: &'a F, path: &'a Path) -> Self {
        Self { fs, path }
    }

    /// Ensure the parent directory of the output path exists.
    pub fn ensure_dir(&self) -> Result<(), ReportWriterError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self
                .fs
                .create_dir_all(parent)
                .map_err(|e| ReportWriterError::CreateDir {
                    path: parent.display().to_string(),
                    source: e,
                }),
            _ => Ok(()),
        }
    }

    /// Write the report, returning the path written.
    pub fn write(&self, report: &Report) -> Result<PathBuf, ReportWriterError> {
        self.ensure_dir()?;
        self.fs
            .write_atomic(self.path, report.content.as_bytes())
            .map_err(|e| ReportWriterError::Write {
                path: self.path.display().to_string(),
                source: e,
            })?;
        Ok(self.path.to_path_buf())
    }
}

/// Convenience function to write a report.
pub fn write_report<F: Filesystem>(
    fs: &F,
    path: &Path,
    report: &Report,
) -> Result<PathBuf, ReportWriterError> {
    ReportWriter::new(fs, path).write(report)
}
