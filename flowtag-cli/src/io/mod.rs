//! IO helpers for CLI operations.
//!
//! Provides utilities for:
//! - Loading the lookup table
//! - Reading the flow log
//! - Writing the report

pub mod flow_log_reader;
pub mod lookup_loader;
pub mod report_writer;

pub use flow_log_reader::{read_flow_log, FlowLogError};
pub use lookup_loader::{load_lookup_table, LookupLoadError};
pub use report_writer::{write_report, ReportWriter, ReportWriterError};
