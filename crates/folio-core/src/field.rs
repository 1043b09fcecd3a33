//! Tolerant field parsers for semi-structured spreadsheet cell values.
//!
//! Source cells hold loosely JSON-like lists and objects, inconsistent
//! delimiters, and multilingual date tokens. Every parser here is total:
//! malformed input degrades to a best-effort value instead of failing, so
//! parse errors never escape a single field.

use std::sync::OnceLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Splits concatenated objects on `}` `,` `{` boundaries with stray whitespace.
fn object_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\}\s*,\s*\{").expect("valid regex"))
}

/// Matches well-formed `"key": "value"` pairs.
fn quoted_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)"\s*:\s*"([^"]*)""#).expect("valid regex"))
}

/// Matches `"key": value` pairs whose value is missing quotes, up to the next
/// comma or closing brace.
fn bare_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)"\s*:\s*([^",}]+)"#).expect("valid regex"))
}

/// One parsed object-list item: string keys mapped to string values in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectEntry {
    fields: Vec<(String, String)>,
}

impl ObjectEntry {
    /// Create an empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key's value, keeping the first-seen position on overwrite
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Get a key's value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True when at least one value is non-empty
    pub fn has_values(&self) -> bool {
        self.fields.iter().any(|(_, v)| !v.is_empty())
    }

    /// Iterate key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the entry holds no keys
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ObjectEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Comparable `(year, month)` key derived from loosely formatted date text.
///
/// Ordering is chronological. The `(0, 0)` sentinel for unparseable input
/// sorts before every real date, and a missing month defaults to December so
/// ongoing entries sort to year-end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    /// Calendar year (0 = unknown)
    pub year: u32,
    /// Month in `[1, 12]` (0 = unknown)
    pub month: u32,
}

impl DateKey {
    /// Sentinel for empty or unparseable input
    pub const UNDATED: DateKey = DateKey { year: 0, month: 0 };
}

/// Strip the artifacts that break strict JSON parsing of list/object cells:
/// trailing commas and newlines before a closing bracket, and adjacent
/// closing/opening braces (with optional CR/LF between) missing their comma.
///
/// Returns `None` for absent or blank input.
fn clean_jsonish(value: Option<&str>) -> Option<String> {
    let cleaned = value?.trim();
    if cleaned.is_empty() {
        return None;
    }
    let mut text = cleaned.to_string();
    for (artifact, repl) in [(",]", "]"), (",\n]", "]"), ("\n]", "]")] {
        text = text.replace(artifact, repl);
    }
    for artifact in ["}\r\n{", "}\r{", "}\n{", "}{"] {
        text = text.replace(artifact, "},{");
    }
    Some(text)
}

/// Render a JSON scalar as the string the output documents carry.
///
/// Nested arrays/objects degrade to their compact JSON text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Parse a list-valued cell.
///
/// Attempts a strict JSON array parse after cleanup; anything else falls back
/// to splitting on line breaks. Elements are trimmed and empties dropped.
///
/// # Examples
///
/// ```
/// use folio_core::field::parse_list;
///
/// assert_eq!(parse_list(Some(r#"["a", "b",]"#)), vec!["a", "b"]);
/// assert_eq!(parse_list(Some("a\nb\n")), vec!["a", "b"]);
/// assert!(parse_list(None).is_empty());
/// ```
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    let Some(cleaned) = clean_jsonish(value) else {
        return Vec::new();
    };
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&cleaned) {
        return items
            .iter()
            .map(|item| scalar_text(item).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
    }
    // fallback: split lines
    cleaned
        .replace('\r', "\n")
        .split('\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Parse an object-list cell (links, co-workers).
///
/// Strict phase: after cleanup, a JSON array yields one entry per object item
/// (scalar values stringified and trimmed), a bare string item becomes a
/// `{name: item}` entry, and a single top-level object yields a one-entry
/// list. On parse failure the forgiving phase splits the content on
/// `}` `,` `{` boundaries and extracts `"key": "value"` pairs per chunk —
/// quoted values first, then unquoted values up to the next comma or closing
/// brace, never overwriting keys already captured. Entries whose every value
/// is empty are dropped in both phases.
pub fn parse_object_list(value: Option<&str>) -> Vec<ObjectEntry> {
    let Some(cleaned) = clean_jsonish(value) else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(parsed) => entries_from_value(parsed),
        Err(_) => entries_from_loose(&cleaned),
    }
}

fn entries_from_value(parsed: Value) -> Vec<ObjectEntry> {
    let items = match parsed {
        Value::Array(items) => items,
        Value::Object(_) => vec![parsed],
        _ => return Vec::new(),
    };

    let mut results = Vec::new();
    for item in items {
        match item {
            Value::Object(map) => {
                let mut entry = ObjectEntry::new();
                for (key, val) in &map {
                    entry.set(key.clone(), scalar_text(val).trim());
                }
                results.push(entry);
            }
            Value::String(s) if !s.trim().is_empty() => {
                let mut entry = ObjectEntry::new();
                entry.set("name", s.trim());
                results.push(entry);
            }
            _ => {}
        }
    }
    results.retain(ObjectEntry::has_values);
    results
}

fn entries_from_loose(cleaned: &str) -> Vec<ObjectEntry> {
    let mut content = cleaned.trim();
    if content.starts_with('[') && content.ends_with(']') {
        content = &content[1..content.len() - 1];
    }

    let mut results = Vec::new();
    for chunk in object_split_re().split(content) {
        let chunk = chunk
            .trim()
            .trim_matches(|c: char| matches!(c, '{' | '}' | ' ' | '\n' | '\r' | '\t'));
        if chunk.is_empty() {
            continue;
        }

        let mut entry = ObjectEntry::new();
        // First capture well-formed quoted values
        for caps in quoted_pair_re().captures_iter(chunk) {
            entry.set(&caps[1], caps[2].trim());
        }
        // Then capture values missing quotes, without clobbering captured keys
        for caps in bare_pair_re().captures_iter(chunk) {
            let key = &caps[1];
            if entry.get(key).is_some() {
                continue;
            }
            let val = caps[2].trim();
            if val.is_empty() {
                continue;
            }
            if ["true", "false", "null"]
                .iter()
                .any(|lit| val.eq_ignore_ascii_case(lit))
            {
                entry.set(key, val.to_ascii_lowercase());
            } else {
                entry.set(key, val);
            }
        }

        if entry.has_values() {
            results.push(entry);
        }
    }
    results
}

/// Parse a boolean-valued cell: `true`, `1`, `yes`, `y` (any case) are true,
/// everything else — absent and empty included — is false.
pub fn parse_bool(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("true" | "1" | "yes" | "y")
    )
}

/// Parse a cell holding work codes: brackets become spaces, tokens split on
/// runs of commas/whitespace, each lower-cased, empties dropped.
pub fn parse_code_list(value: Option<&str>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    let cleaned = value.replace(['[', ']'], " ");
    cleaned
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Parse loosely formatted year/month text into a [`DateKey`].
///
/// CJK year/month markers and `.`/`-` punctuation normalize to `/`, then the
/// first run of digits is the year and the second the month (default 12,
/// clamped to `[1, 12]`).
///
/// # Examples
///
/// ```
/// use folio_core::field::{parse_date_key, DateKey};
///
/// assert_eq!(parse_date_key(Some("2025/10")), DateKey { year: 2025, month: 10 });
/// assert_eq!(parse_date_key(Some("2025")), DateKey { year: 2025, month: 12 });
/// assert_eq!(parse_date_key(None), DateKey::UNDATED);
/// ```
pub fn parse_date_key(value: Option<&str>) -> DateKey {
    let Some(value) = value else {
        return DateKey::UNDATED;
    };
    let cleaned = value
        .replace('年', "/")
        .replace('月', "")
        .replace('.', "/")
        .replace('-', "/");
    let mut parts = cleaned
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty());

    let Some(first) = parts.next() else {
        return DateKey::UNDATED;
    };
    let year = first.parse::<u32>().unwrap_or(0);
    let month = match parts.next() {
        Some(part) => part.parse::<u32>().unwrap_or(12).clamp(1, 12),
        None => 12,
    };
    DateKey { year, month }
}

/// Normalize free text: literal `\n` escape sequences and carriage returns
/// become line breaks, surrounding whitespace is trimmed.
pub fn normalize_multiline(value: Option<&str>) -> String {
    match value {
        Some(v) => v.replace("\\n", "\n").replace('\r', "\n").trim().to_string(),
        None => String::new(),
    }
}

/// Collapse newlines to spaces and trim — single-line display fields.
pub fn collapse_newlines(value: Option<&str>) -> String {
    match value {
        Some(v) => v.replace('\n', " ").trim().to_string(),
        None => String::new(),
    }
}

/// Fold a display name into its lookup key: all whitespace removed,
/// lower-cased.
pub fn normalize_name(value: &str) -> String {
    value.split_whitespace().collect::<String>().to_lowercase()
}
