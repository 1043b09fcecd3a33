//! Chronological experience/timeline dataset built from the experience CSV.

use serde::Serialize;

use crate::field::{normalize_multiline, parse_bool, parse_code_list, parse_list};
use crate::row::RowSet;

/// Header prefix marking a visibility-group column
const SHOW_PREFIX: &str = "show";

/// Column carrying the default-visibility flag
const SHOW_DEFAULT: &str = "show_default";

/// One timeline entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// Entry category; distinct values are recorded in `typeOrder`
    #[serde(rename = "type")]
    pub kind: String,
    /// Organisation name
    pub organisation: String,
    /// Role held
    pub role: String,
    /// Raw starting-month marker
    pub begin: String,
    /// Raw ending-month marker (empty = ongoing)
    pub end: String,
    /// Related work codes, lower-cased, order preserved
    pub related_works: Vec<String>,
    /// Free-text description, multiline-normalized
    pub description: String,
    /// Default-context visibility flag
    pub show_default: bool,
    /// Names of the visibility groups this entry appears in
    pub show_groups: Vec<String>,
    /// Tag list
    pub tags: Vec<String>,
}

/// The experience document payload: category order plus entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceData {
    /// Distinct `type` values in first-seen order
    pub type_order: Vec<String>,
    /// Entries in source order
    pub entries: Vec<ExperienceEntry>,
}

/// Transform experience rows into the timeline payload.
///
/// Rows whose `type` trims empty are excluded entirely. Visibility columns
/// are every header starting with `show` (case-insensitive), contributing
/// their name to `showGroups` when their value bool-parses true;
/// `show_default` is appended when set and not already present.
pub fn assemble_experience(rows: &RowSet) -> ExperienceData {
    let show_columns: Vec<&str> = rows
        .headers()
        .iter()
        .filter(|h| h.to_lowercase().starts_with(SHOW_PREFIX))
        .map(String::as_str)
        .collect();

    let mut data = ExperienceData::default();
    for row in rows.iter() {
        let Some(kind) = row.get_trimmed("type").filter(|t| !t.is_empty()) else {
            continue;
        };
        if !data.type_order.iter().any(|t| t == kind) {
            data.type_order.push(kind.to_string());
        }

        let show_default = parse_bool(row.get(SHOW_DEFAULT));
        let mut show_groups: Vec<String> = show_columns
            .iter()
            .filter(|col| parse_bool(row.get(col)))
            .map(|col| col.to_string())
            .collect();
        if show_default && !show_groups.iter().any(|g| g == SHOW_DEFAULT) {
            show_groups.push(SHOW_DEFAULT.to_string());
        }

        data.entries.push(ExperienceEntry {
            kind: kind.to_string(),
            // historical header alias: "organization/" predates "organization"
            organisation: row
                .first_filled(&["organization/", "organization"])
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            role: row.get_trimmed("role").unwrap_or_default().to_string(),
            begin: row.get_trimmed("begin_m").unwrap_or_default().to_string(),
            end: row.get_trimmed("end_m").unwrap_or_default().to_string(),
            related_works: parse_code_list(row.get("related_work")),
            description: normalize_multiline(row.get("introd")),
            show_default,
            show_groups,
            tags: parse_list(row.get("tag")),
        });
    }
    data
}
