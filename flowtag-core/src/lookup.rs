//! Lookup table parsing.
//!
//! Format:
//! - First line is a header and is discarded
//! - Each following row is `dstport,protocol,tag`
//! - Fields are trimmed; protocol is lowercased, tag case is kept
//! - Blank lines are ignored
//! - Quoted fields follow CSV rules

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::types::{LookupKey, LookupTable};

/// Number of fields in a lookup row.
pub const LOOKUP_FIELDS: usize = 3;

/// Errors from lookup table parsing.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("malformed row on line {line}: expected 3 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// What to do with a row that does not have exactly [`LOOKUP_FIELDS`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Fail on the first malformed row.
    #[default]
    Reject,
    /// Leave the row out and record it in [`LookupParse::skipped`].
    Skip,
}

/// A malformed row that was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number.
    pub line: u64,
    pub fields: usize,
}

/// Result of parsing with a [`RowPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupParse {
    pub table: LookupTable,
    pub skipped: Vec<SkippedRow>,
}

/// Parse lookup table content, failing on the first malformed row.
pub fn parse_lookup_table(content: &str) -> Result<LookupTable, LookupError> {
    parse_lookup_table_with(content, RowPolicy::Reject).map(|parsed| parsed.table)
}

/// Parse lookup table content with an explicit malformed-row policy.
pub fn parse_lookup_table_with(
    content: &str,
    policy: RowPolicy,
) -> Result<LookupParse, LookupError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut parsed = LookupParse::default();

    for result in reader.records() {
        let record = result?;

        if is_blank(&record) {
            continue;
        }

        if record.len() != LOOKUP_FIELDS {
            let line = record.position().map_or(0, |p| p.line());
            match policy {
                RowPolicy::Reject => {
                    return Err(LookupError::MalformedRow {
                        line,
                        fields: record.len(),
                    })
                }
                RowPolicy::Skip => {
                    parsed.skipped.push(SkippedRow {
                        line,
                        fields: record.len(),
                    });
                    continue;
                }
            }
        }

        let dst_port = record[0].trim();
        let protocol = record[1].trim().to_lowercase();
        let tag = record[2].trim();

        parsed.table.insert(LookupKey::new(dst_port, protocol), tag);
    }

    Ok(parsed)
}

/// Whitespace-only lines come through as a single empty-ish field.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "dstport,protocol,tag\n\
                          25,tcp,sv_P1\n\
                          68,udp,sv_P2\n\
                          23,tcp,sv_P1\n\
                          443,tcp,sv_P2\n\
                          22,tcp,sv_P4\n\
                          110,tcp,email\n\
                          993,tcp,email\n";

    fn key(port: &str, proto: &str) -> LookupKey {
        LookupKey::new(port, proto)
    }

    // ===========================================
    // Basic parsing
    // ===========================================

    #[test]
    fn test_parse_sample_table() {
        let table = parse_lookup_table(SAMPLE).expect("parse");

        assert_eq!(table.len(), 7);
        assert_eq!(table.get(&key("25", "tcp")), Some("sv_P1"));
        assert_eq!(table.get(&key("68", "udp")), Some("sv_P2"));
        assert_eq!(table.get(&key("23", "tcp")), Some("sv_P1"));
        assert_eq!(table.get(&key("443", "tcp")), Some("sv_P2"));
        assert_eq!(table.get(&key("22", "tcp")), Some("sv_P4"));
        assert_eq!(table.get(&key("110", "tcp")), Some("email"));
        assert_eq!(table.get(&key("993", "tcp")), Some("email"));
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_lookup_table("dstport,protocol,tag\n").expect("parse");
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_empty_content() {
        let table = parse_lookup_table("").expect("parse");
        assert!(table.is_empty());
    }

    #[test]
    fn test_header_is_discarded_whatever_it_says() {
        let table = parse_lookup_table("80,tcp,web\n443,tcp,tls\n").expect("parse");

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&key("80", "tcp")), None);
        assert_eq!(table.get(&key("443", "tcp")), Some("tls"));
    }

    // ===========================================
    // Normalization
    // ===========================================

    #[test]
    fn test_fields_are_trimmed() {
        let table = parse_lookup_table("h1,h2,h3\n  25 , tcp ,  sv_P1  \n").expect("parse");
        assert_eq!(table.get(&key("25", "tcp")), Some("sv_P1"));
    }

    #[test]
    fn test_protocol_is_lowercased() {
        let table = parse_lookup_table("h1,h2,h3\n25,TCP,sv_P1\n53,Udp,dns\n").expect("parse");

        assert_eq!(table.get(&key("25", "tcp")), Some("sv_P1"));
        assert_eq!(table.get(&key("53", "udp")), Some("dns"));
    }

    #[test]
    fn test_tag_case_preserved() {
        let table = parse_lookup_table("h1,h2,h3\n25,tcp,SV_P1\n").expect("parse");
        assert_eq!(table.get(&key("25", "tcp")), Some("SV_P1"));
    }

    #[test]
    fn test_port_not_normalized() {
        let table = parse_lookup_table("h1,h2,h3\n025,tcp,sv_P1\n").expect("parse");

        assert_eq!(table.get(&key("025", "tcp")), Some("sv_P1"));
        assert_eq!(table.get(&key("25", "tcp")), None);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let content = "h1,h2,h3\n25,tcp,first\n25,TCP,second\n";
        let table = parse_lookup_table(content).expect("parse");

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&key("25", "tcp")), Some("second"));
    }

    #[test]
    fn test_quoted_fields() {
        let content = "h1,h2,h3\n\"25\",\"tcp\",\"mail, outbound\"\n";
        let table = parse_lookup_table(content).expect("parse");
        assert_eq!(table.get(&key("25", "tcp")), Some("mail, outbound"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "dstport,protocol,tag\r\n25,tcp,sv_P1\r\n443,tcp,sv_P2\r\n";
        let table = parse_lookup_table(content).expect("parse");

        assert_eq!(table.get(&key("25", "tcp")), Some("sv_P1"));
        assert_eq!(table.get(&key("443", "tcp")), Some("sv_P2"));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let content = "h1,h2,h3\n\n25,tcp,sv_P1\n   \n\n443,tcp,sv_P2\n";
        let table = parse_lookup_table(content).expect("parse");
        assert_eq!(table.len(), 2);
    }

    // ===========================================
    // Malformed rows
    // ===========================================

    #[test]
    fn test_too_few_fields_rejected() {
        let content = "h1,h2,h3\n25,tcp,sv_P1\n443,tcp\n";
        let err = parse_lookup_table(content).unwrap_err();

        match err {
            LookupError::MalformedRow { line, fields } => {
                assert_eq!(line, 3);
                assert_eq!(fields, 2);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_fields_rejected() {
        let content = "h1,h2,h3\n25,tcp,sv_P1,extra\n";
        let err = parse_lookup_table(content).unwrap_err();

        assert!(matches!(err, LookupError::MalformedRow { line: 2, fields: 4 }));
    }

    #[test]
    fn test_malformed_row_message() {
        let err = LookupError::MalformedRow { line: 7, fields: 1 };
        assert_eq!(
            err.to_string(),
            "malformed row on line 7: expected 3 fields, found 1"
        );
    }

    #[test]
    fn test_skip_policy_keeps_good_rows() {
        let content = "h1,h2,h3\n25,tcp,sv_P1\nbroken\n443,tcp,sv_P2,x\n23,tcp,sv_P1\n";
        let parsed = parse_lookup_table_with(content, RowPolicy::Skip).expect("parse");

        assert_eq!(parsed.table.len(), 2);
        assert_eq!(parsed.table.get(&key("25", "tcp")), Some("sv_P1"));
        assert_eq!(parsed.table.get(&key("23", "tcp")), Some("sv_P1"));
        assert_eq!(
            parsed.skipped,
            vec![
                SkippedRow { line: 3, fields: 1 },
                SkippedRow { line: 4, fields: 4 },
            ]
        );
    }

    #[test]
    fn test_default_policy_is_reject() {
        assert_eq!(RowPolicy::default(), RowPolicy::Reject);
    }
}
