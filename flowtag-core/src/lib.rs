//! flowtag core
//!
//! Tags flow-log records by destination port and protocol and aggregates:
//! - per-tag record counts
//! - per (port, protocol) combination counts
//!
//! Pipeline: lookup table -> classify flow-log lines -> render report.
//! Everything here is pure; reading and writing files lives in the CLI crate.

pub mod classify;
pub mod logger;
pub mod lookup;
pub mod protocol;
pub mod report;
pub mod types;

pub use classify::{classify_lines, Classification, FlowClassifier, FlowRecord};
pub use logger::{LogEntry, Logger, MockLogger, NullLogger, StderrLogger, Verbosity};
pub use lookup::{parse_lookup_table, parse_lookup_table_with, LookupError, LookupParse, RowPolicy};
pub use protocol::{protocol_name, UNKNOWN_PROTOCOL};
pub use report::Report;
pub use types::{LookupKey, LookupTable, PortProtocolCounts, TagCounts, EMAIL_TAG, UNTAGGED};
