//! Per-work detail records joined against the code mapping.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::field::{
    collapse_newlines, normalize_multiline, normalize_name, parse_list, parse_object_list,
    ObjectEntry,
};
use crate::mapping::CodeMap;
use crate::row::{Row, RowSet};

/// Normalized detail fields for one work entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    /// Full display name, newline-collapsed
    pub full_name: String,
    /// Secondary heading, newline-collapsed
    pub h2_name: String,
    /// Short table/listing name, newline-collapsed
    pub table_name: String,
    /// Raw starting-year text
    pub year_begin: String,
    /// Raw ending-year text
    pub year_end: String,
    /// Free-text introduction, multiline-normalized
    pub intro: String,
    /// Introduction bullet list
    pub intro_list: Vec<String>,
    /// Head image reference
    pub head_pic: String,
    /// Tag list
    pub tags: Vec<String>,
    /// External links (arbitrary string-keyed entries)
    pub links: Vec<ObjectEntry>,
    /// Co-worker credits (arbitrary string-keyed entries)
    pub co_workers: Vec<ObjectEntry>,
    /// Long-form content
    pub content: String,
}

impl DetailRecord {
    fn from_row(row: &Row) -> Self {
        Self {
            full_name: collapse_newlines(row.get("fullName")),
            h2_name: collapse_newlines(row.get("h2Name")),
            table_name: collapse_newlines(row.get("tableName")),
            year_begin: row.get_trimmed("yearBegin").unwrap_or_default().to_string(),
            year_end: row.get_trimmed("yearEnd").unwrap_or_default().to_string(),
            intro: normalize_multiline(row.get("introd")),
            intro_list: parse_list(row.get("introd_list")),
            head_pic: row.get_trimmed("headPic").unwrap_or_default().to_string(),
            tags: parse_list(row.get("tag")),
            links: parse_object_list(row.get("link")),
            co_workers: parse_object_list(row.get("coWorker")),
            content: row.get_trimmed("content").unwrap_or_default().to_string(),
        }
    }
}

/// Code-keyed detail store plus the rows that resolved to no code.
///
/// Serializes as a JSON object keyed by code, in insertion order of first
/// resolution; `unmatched` is for reporting only and never serialized.
#[derive(Debug, Clone, Default)]
pub struct DetailSet {
    records: Vec<(String, DetailRecord)>,
    /// Labels of rows that matched no mapping entry, in source order
    pub unmatched: Vec<String>,
}

impl DetailSet {
    /// Get a record by code
    pub fn get(&self, code: &str) -> Option<&DetailRecord> {
        self.records
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, r)| r)
    }

    /// Number of resolved records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no rows resolved
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate code/record pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailRecord)> {
        self.records.iter().map(|(c, r)| (c.as_str(), r))
    }

    fn insert(&mut self, code: &str, record: DetailRecord) {
        match self.records.iter_mut().find(|(c, _)| c == code) {
            Some((_, existing)) => *existing = record,
            None => self.records.push((code.to_string(), record)),
        }
    }
}

impl Serialize for DetailSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (code, record) in &self.records {
            map.serialize_entry(code, record)?;
        }
        map.end()
    }
}

/// Join detail rows against the mapping.
///
/// Per row, resolve a code by: the row's own trimmed/lower-cased `index`
/// when present in the mapping; else the mapping entry whose display name,
/// whitespace-stripped and lower-cased, equals the row's `tableName` (or
/// `fullName` fallback) normalized the same way. Rows resolving to neither
/// are recorded in `unmatched` and excluded. Duplicate-resolved codes
/// overwrite in place.
pub fn assemble_details(rows: &RowSet, mapping: &CodeMap) -> DetailSet {
    let mut details = DetailSet::default();
    for row in rows.iter() {
        let code = resolve_code(row, mapping);
        match code {
            Some(code) => {
                let record = DetailRecord::from_row(row);
                details.insert(&code, record);
            }
            None => details.unmatched.push(unmatched_label(row)),
        }
    }
    details
}

fn resolve_code(row: &Row, mapping: &CodeMap) -> Option<String> {
    let own = row
        .get_trimmed("index")
        .map(str::to_lowercase)
        .filter(|c| !c.is_empty());
    if let Some(code) = own {
        if mapping.contains(&code) {
            return Some(code);
        }
    }
    let name = row.first_filled(&["tableName", "fullName"])?;
    mapping
        .code_for_normalized_name(&normalize_name(name))
        .map(String::from)
}

fn unmatched_label(row: &Row) -> String {
    row.first_filled(&["tableName", "fullName", "index"])
        .map(|label| label.trim().to_string())
        .unwrap_or_else(|| "(unnamed row)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::build_mapping;
    use pretty_assertions::assert_eq;

    fn rows(grid: &[&[&str]]) -> RowSet {
        RowSet::from_grid(
            grid.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_resolve_by_own_code() {
        let source = rows(&[
            &["index", "tableName", "yearBegin"],
            &["w1", "Project One", "2021"],
        ]);
        let mapping = build_mapping(&source);
        let details = assemble_details(&source, &mapping);
        assert_eq!(details.len(), 1);
        let record = details.get("w1").unwrap();
        assert_eq!(record.table_name, "Project One");
        assert_eq!(record.year_begin, "2021");
        assert!(details.unmatched.is_empty());
    }

    #[test]
    fn test_resolve_by_normalized_name_when_code_blank() {
        let mapping = build_mapping(&rows(&[&["index", "tableName"], &["w1", "Project One"]]));
        // Detail row lost its code but the name matches after normalization
        let detail_rows = rows(&[&["index", "tableName"], &["", "  project  ONE "]]);
        let details = assemble_details(&detail_rows, &mapping);
        assert!(details.get("w1").is_some());
        assert!(details.unmatched.is_empty());
    }

    #[test]
    fn test_full_name_fallback_for_name_match() {
        let mapping = build_mapping(&rows(&[&["index", "fullName"], &["w1", "The Long Name"]]));
        let detail_rows = rows(&[
            &["index", "tableName", "fullName"],
            &["", "", "the long name"],
        ]);
        let details = assemble_details(&detail_rows, &mapping);
        assert!(details.get("w1").is_some());
    }

    #[test]
    fn test_unmatched_rows_reported_not_dropped() {
        let mapping = build_mapping(&rows(&[&["index", "tableName"], &["w1", "One"]]));
        let detail_rows = rows(&[
            &["index", "tableName"],
            &["w9", "Unknown Work"],
            &["w1", "One"],
        ]);
        let details = assemble_details(&detail_rows, &mapping);
        assert_eq!(details.len(), 1);
        assert_eq!(details.unmatched, vec!["Unknown Work"]);
    }

    #[test]
    fn test_unmatched_anonymous_row_labeled() {
        let mapping = CodeMap::new();
        let detail_rows = rows(&[&["index", "tableName", "content"], &["", "", "stray text"]]);
        let details = assemble_details(&detail_rows, &mapping);
        assert_eq!(details.unmatched, vec!["(unnamed row)"]);
    }

    #[test]
    fn test_duplicate_resolution_overwrites_in_place() {
        let mapping = build_mapping(&rows(&[
            &["index", "tableName"],
            &["w1", "One"],
            &["w2", "Two"],
        ]));
        let detail_rows = rows(&[
            &["index", "tableName", "content"],
            &["w1", "One", "first"],
            &["w2", "Two", "middle"],
            &["w1", "One", "second"],
        ]);
        let details = assemble_details(&detail_rows, &mapping);
        assert_eq!(details.get("w1").unwrap().content, "second");
        let codes: Vec<_> = details.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec!["w1", "w2"]);
    }

    #[test]
    fn test_field_normalization() {
        let source = rows(&[
            &[
                "index",
                "tableName",
                "fullName",
                "introd",
                "introd_list",
                "tag",
                "link",
                "coWorker",
            ],
            &[
                "w1",
                "Short\nName",
                "Full\nName",
                "line one\\nline two",
                "bullet a\nbullet b",
                r#"["web", "print"]"#,
                "{\"name\":\"Repo\"}\n{\"name\":\"Docs\"}",
                r#"[{"name": "Alice", "role": "design"}]"#,
            ],
        ]);
        let mapping = build_mapping(&source);
        let details = assemble_details(&source, &mapping);
        let record = details.get("w1").unwrap();
        assert_eq!(record.table_name, "Short Name");
        assert_eq!(record.full_name, "Full Name");
        assert_eq!(record.intro, "line one\nline two");
        assert_eq!(record.intro_list, vec!["bullet a", "bullet b"]);
        assert_eq!(record.tags, vec!["web", "print"]);
        assert_eq!(record.links.len(), 2);
        assert_eq!(record.links[1].get("name"), Some("Docs"));
        assert_eq!(record.co_workers[0].get("role"), Some("design"));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let source = rows(&[&["index", "tableName"], &["w1", "One"]]);
        let mapping = build_mapping(&source);
        let details = assemble_details(&source, &mapping);
        let json = serde_json::to_value(&details).unwrap();
        let record = &json["w1"];
        assert_eq!(record["tableName"], "One");
        assert!(record.get("introList").is_some());
        assert!(record.get("coWorkers").is_some());
        assert!(record.get("headPic").is_some());
    }
}
