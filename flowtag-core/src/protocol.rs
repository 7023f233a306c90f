//! IANA protocol numbers understood by the classifier.

/// Name used for protocol numbers missing from [`PROTOCOL_NAMES`].
pub const UNKNOWN_PROTOCOL: &str = "unknown";

/// Protocol number to lowercase protocol name.
pub const PROTOCOL_NAMES: [(&str, &str); 3] = [("6", "tcp"), ("17", "udp"), ("1", "icmp")];

/// Resolve a protocol number as written in a flow record.
///
/// Matching is on the exact text, so "06" is not TCP.
pub fn protocol_name(number: &str) -> Option<&'static str> {
    PROTOCOL_NAMES
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_protocols() {
        assert_eq!(protocol_name("6"), Some("tcp"));
        assert_eq!(protocol_name("17"), Some("udp"));
        assert_eq!(protocol_name("1"), Some("icmp"));
    }

    #[test]
    fn test_unknown_protocols() {
        assert_eq!(protocol_name("47"), None);
        assert_eq!(protocol_name("06"), None);
        assert_eq!(protocol_name("tcp"), None);
        assert_eq!(protocol_name(""), None);
    }
}
