//! Flow-log classification.
//!
//! Each line is split on whitespace. Lines with fewer than [`MIN_FIELDS`]
//! fields are skipped without touching any count. For the rest, the
//! destination port (field 5) and protocol number (field 7) select a tag from
//! the lookup table, and both aggregates are incremented exactly once.

use crate::logger::Logger;
use crate::protocol::{protocol_name, UNKNOWN_PROTOCOL};
use crate::types::{LookupKey, LookupTable, PortProtocolCounts, TagCounts};

/// Minimum whitespace-separated fields in a usable record.
pub const MIN_FIELDS: usize = 8;

/// Index of the destination port field.
pub const DST_PORT_FIELD: usize = 5;

/// Index of the protocol number field.
pub const PROTOCOL_FIELD: usize = 7;

/// The two fields of a flow record the classifier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord<'a> {
    pub dst_port: &'a str,
    pub protocol_number: &'a str,
}

impl<'a> FlowRecord<'a> {
    /// Parse a flow-log line. Returns `None` for lines that are too short.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut dst_port = None;
        let mut protocol_number = None;
        let mut fields = 0;

        for (i, field) in line.split_whitespace().enumerate() {
            match i {
                DST_PORT_FIELD => dst_port = Some(field),
                PROTOCOL_FIELD => protocol_number = Some(field),
                _ => {}
            }
            fields = i + 1;
            if fields >= MIN_FIELDS {
                break;
            }
        }

        if fields < MIN_FIELDS {
            return None;
        }

        Some(Self {
            dst_port: dst_port?.trim(),
            protocol_number: protocol_number?.trim(),
        })
    }
}

/// Aggregates produced by a classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub tag_counts: TagCounts,
    pub port_protocol_counts: PortProtocolCounts,
    /// Lines with at least [`MIN_FIELDS`] fields.
    pub valid_lines: u64,
    /// Lines dropped for having too few fields.
    pub skipped_lines: u64,
    /// Valid lines whose protocol number was not recognised.
    pub unknown_protocol_lines: u64,
}

/// Incremental classifier over flow-log lines.
pub struct FlowClassifier<'a, L: Logger + ?Sized> {
    table: &'a LookupTable,
    logger: &'a L,
    result: Classification,
}

impl<'a, L: Logger + ?Sized> FlowClassifier<'a, L> {
    /// Create a classifier. Unknown-protocol warnings go to `logger`.
    pub fn new(table: &'a LookupTable, logger: &'a L) -> Self {
        Self {
            table,
            logger,
            result: Classification::default(),
        }
    }

    /// Classify a single line and update the aggregates.
    pub fn classify_line(&mut self, line: &str) {
        let record = match FlowRecord::parse(line) {
            Some(record) => record,
            None => {
                self.result.skipped_lines += 1;
                return;
            }
        };

        let protocol = match protocol_name(record.protocol_number) {
            Some(name) => name,
            None => {
                self.logger.warn(&format!(
                    "Warning: Unknown protocol number '{}' in line: {}",
                    record.protocol_number,
                    line.trim()
                ));
                self.result.unknown_protocol_lines += 1;
                UNKNOWN_PROTOCOL
            }
        };

        let key = LookupKey::new(record.dst_port, protocol);
        let tag = self.table.tag_for(&key);

        self.result.tag_counts.increment(tag);
        self.result.port_protocol_counts.increment(&key);
        self.result.valid_lines += 1;
    }

    /// Aggregates so far.
    pub fn result(&self) -> &Classification {
        &self.result
    }

    /// Consume the classifier and return the aggregates.
    pub fn finish(self) -> Classification {
        self.result
    }
}

/// Classify every line from `lines` against `table`.
pub fn classify_lines<'l, I, L>(lines: I, table: &LookupTable, logger: &L) -> Classification
where
    I: IntoIterator<Item = &'l str>,
    L: Logger + ?Sized,
{
    let mut classifier = FlowClassifier::new(table, logger);
    for line in lines {
        classifier.classify_line(line);
    }
    classifier.finish()
}
