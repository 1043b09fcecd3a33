//! Code→display-name mapping built from the source rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::field::{collapse_newlines, normalize_name};
use crate::row::RowSet;

/// Display-name candidate fields, in priority order
const NAME_CANDIDATES: [&str; 3] = ["tableName", "fullName", "h2Name"];

/// Insertion-ordered map of work codes to display names.
///
/// Codes are trimmed and lower-cased, so the map is case-insensitively
/// unique. Re-inserting a code overwrites its name but keeps the original
/// position. Serializes as a flat JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMap {
    entries: Vec<(String, String)>,
}

impl CodeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code→name pair. The code is trimmed and lower-cased; blank
    /// codes are ignored. Duplicates keep their first-seen position.
    pub fn insert(&mut self, code: &str, name: impl Into<String>) {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return;
        }
        let name = name.into();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => *existing = name,
            None => self.entries.push((code, name)),
        }
    }

    /// Get the display name for a code (caller normalizes the code)
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, n)| n.as_str())
    }

    /// True when the code is present
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Reverse lookup: the code whose display name, whitespace-stripped and
    /// lower-cased, equals the given normalized name.
    pub fn code_for_normalized_name(&self, normalized: &str) -> Option<&str> {
        if normalized.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, name)| normalize_name(name) == normalized)
            .map(|(code, _)| code.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate code/name pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }
}

impl Serialize for CodeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, name) in &self.entries {
            map.serialize_entry(code, name)?;
        }
        map.end()
    }
}

/// Build the code→display-name map from source rows.
///
/// The code is the `index` field, trimmed and lower-cased; rows without one
/// are skipped silently. The display name is the first non-empty of
/// `tableName`, `fullName`, `h2Name`, newline-collapsed. Duplicate codes:
/// last name wins, first position kept.
pub fn build_mapping(rows: &RowSet) -> CodeMap {
    let mut mapping = CodeMap::new();
    for row in rows.iter() {
        let Some(code) = row.get_trimmed("index").filter(|c| !c.is_empty()) else {
            continue;
        };
        let name = collapse_newlines(row.first_filled(&NAME_CANDIDATES));
        mapping.insert(code, name);
    }
    mapping
}
