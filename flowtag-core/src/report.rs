//! Report rendering.
//!
//! Layout:
//!
//! ```text
//! Tag Counts:
//! Tag,Count
//! <tag>,<count>
//!
//! Port/Protocol Combination Counts:
//! Port,Protocol,Count
//! <port>,<protocol>,<count>
//! ```
//!
//! Tags sort alphabetically, then `email`, then `Untagged` last.
//! Combinations sort by numeric port, then protocol.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::classify::Classification;
use crate::types::{LookupKey, PortProtocolCounts, TagCounts, EMAIL_TAG, UNTAGGED};

/// Rendered report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub content: String,
}

impl Report {
    /// Render a report from classification results.
    pub fn generate(classification: &Classification) -> Self {
        Self {
            content: render(
                &classification.tag_counts,
                &classification.port_protocol_counts,
            ),
        }
    }
}

/// Order tags by (is `Untagged`, is `email`, name).
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    let rank = |tag: &str| (tag == UNTAGGED, tag == EMAIL_TAG);
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// Order combinations by numeric port, then protocol.
///
/// Ports that are not unsigned integers come after all numeric ports and are
/// ordered by their text. Equal numeric values written differently ("25" and
/// "025") fall back to the port text so the order is total.
pub fn compare_port_protocol(a: &LookupKey, b: &LookupKey) -> Ordering {
    match (numeric_port(&a.dst_port), numeric_port(&b.dst_port)) {
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| a.protocol.cmp(&b.protocol))
            .then_with(|| a.dst_port.cmp(&b.dst_port)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .dst_port
            .cmp(&b.dst_port)
            .then_with(|| a.protocol.cmp(&b.protocol)),
    }
}

fn numeric_port(port: &str) -> Option<u64> {
    port.parse().ok()
}

/// Tag counts in report order.
pub fn sorted_tags(counts: &TagCounts) -> Vec<(&str, u64)> {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| compare_tags(a.0, b.0));
    sorted
}

/// Port/protocol counts in report order.
pub fn sorted_port_protocols(counts: &PortProtocolCounts) -> Vec<(&LookupKey, u64)> {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| compare_port_protocol(a.0, b.0));
    sorted
}

/// Render the full report text.
pub fn render(tag_counts: &TagCounts, port_protocol_counts: &PortProtocolCounts) -> String {
    let mut out = String::new();

    out.push_str("Tag Counts:\nTag,Count\n");
    for (tag, count) in sorted_tags(tag_counts) {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{},{}", tag, count);
    }

    out.push_str("\nPort/Protocol Combination Counts:\nPort,Protocol,Count\n");
    for (key, count) in sorted_port_protocols(port_protocol_counts) {
        let _ = writeln!(out, "{},{},{}", key.dst_port, key.protocol, count);
    }

    out
}
