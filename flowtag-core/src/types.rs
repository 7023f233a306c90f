//! Shared types: lookup keys, the lookup table and the two aggregates.

use std::collections::HashMap;

/// Tag assigned to records with no lookup entry.
pub const UNTAGGED: &str = "Untagged";

/// Tag that sorts after all other tags except [`UNTAGGED`] in reports.
pub const EMAIL_TAG: &str = "email";

/// Destination port and protocol name pair.
///
/// Ports are kept as the text found in the input; "25" and "025" are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupKey {
    pub dst_port: String,
    pub protocol: String,
}

impl LookupKey {
    /// Create a new lookup key.
    pub fn new(dst_port: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            dst_port: dst_port.into(),
            protocol: protocol.into(),
        }
    }
}

/// Mapping from (port, protocol) to tag. Later inserts overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<LookupKey, String>,
}

impl LookupTable {
    /// Create an empty lookup table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping, returning the tag it replaced.
    pub fn insert(&mut self, key: LookupKey, tag: impl Into<String>) -> Option<String> {
        self.entries.insert(key, tag.into())
    }

    /// Tag for a key, if any.
    pub fn get(&self, key: &LookupKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Tag for a key, falling back to [`UNTAGGED`].
    pub fn tag_for(&self, key: &LookupKey) -> &str {
        self.get(key).unwrap_or(UNTAGGED)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LookupKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl FromIterator<(LookupKey, String)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (LookupKey, String)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, tag) in iter {
            table.insert(key, tag);
        }
        table
    }
}

/// Record count per tag.
///
/// Always holds [`UNTAGGED`], seeded at zero on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCounts {
    counts: HashMap<String, u64>,
}

impl TagCounts {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        counts.insert(UNTAGGED.to_string(), 0);
        Self { counts }
    }

    /// Add one record under `tag`.
    pub fn increment(&mut self, tag: &str) {
        match self.counts.get_mut(tag) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(tag.to_string(), 1);
            }
        }
    }

    /// Count for `tag`, zero if never seen.
    pub fn get(&self, tag: &str) -> u64 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct tags, including [`UNTAGGED`].
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for TagCounts {
    fn default() -> Self {
        Self::new()
    }
}

/// Record count per (port, protocol) combination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortProtocolCounts {
    counts: HashMap<LookupKey, u64>,
}

impl PortProtocolCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record under `key`.
    pub fn increment(&mut self, key: &LookupKey) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.clone(), 1);
            }
        }
    }

    /// Count for `key`, zero if never seen.
    pub fn get(&self, key: &LookupKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LookupKey, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }
}
