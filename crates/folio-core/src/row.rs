//! Uniform row model shared by every tabular source.
//!
//! Both the XLSX grid and the CSV reader reduce to the same shape: a header
//! list plus rows of field-name→raw-string values. Assemblers only ever see
//! this shape, so they never care where the data came from.

/// One source record: field names mapped to raw string values, in header
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Build a row by zipping headers with a record, padding short records
    /// with empty strings.
    pub fn from_record(headers: &[String], record: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = record.get(i).cloned().unwrap_or_default();
                (name.clone(), value)
            })
            .collect();
        Self { fields }
    }

    /// Get a field's raw value by exact field name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a field's value with surrounding whitespace trimmed
    pub fn get_trimmed(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim)
    }

    /// Ordered fallback chain: the first candidate field whose trimmed value
    /// is non-empty.
    pub fn first_filled(&self, candidates: &[&str]) -> Option<&str> {
        candidates
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| !value.trim().is_empty())
    }

    /// True when every field value is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.trim().is_empty())
    }

    /// Iterate field name/value pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// An ordered collection of rows plus the header list they were built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    /// Build from a raw string grid whose first row is the header row.
    ///
    /// Header names are trimmed. Rows that are entirely blank are skipped.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut iter = grid.into_iter();
        let headers: Vec<String> = match iter.next() {
            Some(header_row) => header_row.iter().map(|h| h.trim().to_string()).collect(),
            None => return Self::default(),
        };
        let rows = iter
            .map(|record| Row::from_record(&headers, &record))
            .filter(|row| !row.is_blank())
            .collect();
        Self { headers, rows }
    }

    /// Build from explicit headers and records (the CSV path).
    ///
    /// Same trimming and blank-row rules as [`RowSet::from_grid`].
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let rows = records
            .iter()
            .map(|record| Row::from_record(&headers, record))
            .filter(|row| !row.is_blank())
            .collect();
        Self { headers, rows }
    }

    /// Header names in source order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// True when a header with this exact name exists
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Rows in source order (blank rows already removed)
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the set holds no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in source order
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_from_grid_headers_and_rows() {
        let rows = RowSet::from_grid(grid(&[
            &["index", "tableName"],
            &["w1", "Project One"],
            &["w2", "Project Two"],
        ]));
        assert_eq!(rows.headers(), &["index", "tableName"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.rows()[0].get("index"), Some("w1"));
        assert_eq!(rows.rows()[1].get("tableName"), Some("Project Two"));
    }

    #[test]
    fn test_from_grid_trims_headers() {
        let rows = RowSet::from_grid(grid(&[&[" index ", "tableName\n"], &["w1", "One"]]));
        assert!(rows.has_header("index"));
        assert!(rows.has_header("tableName"));
        assert_eq!(rows.rows()[0].get("index"), Some("w1"));
    }

    #[test]
    fn test_blank_rows_skipped() {
        let rows = RowSet::from_grid(grid(&[
            &["index", "tableName"],
            &["", "  "],
            &["w1", "One"],
            &[],
        ]));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_short_records_pad_with_empty() {
        let rows = RowSet::from_grid(grid(&[&["a", "b", "c"], &["1"]]));
        assert_eq!(rows.rows()[0].get("b"), Some(""));
        assert_eq!(rows.rows()[0].get("c"), Some(""));
    }

    #[test]
    fn test_empty_grid() {
        let rows = RowSet::from_grid(Vec::new());
        assert!(rows.is_empty());
        assert!(rows.headers().is_empty());
    }

    #[test]
    fn test_first_filled_chain() {
        let rows = RowSet::from_grid(grid(&[
            &["tableName", "fullName", "h2Name"],
            &["  ", "Full Name", "Heading"],
        ]));
        let row = &rows.rows()[0];
        assert_eq!(
            row.first_filled(&["tableName", "fullName", "h2Name"]),
            Some("Full Name")
        );
        assert_eq!(row.first_filled(&["missing", "tableName"]), None);
    }

    #[test]
    fn test_from_records_matches_grid() {
        let a = RowSet::from_records(
            vec!["x".into(), "y".into()],
            vec![vec!["1".into(), "2".into()]],
        );
        let b = RowSet::from_grid(grid(&[&["x", "y"], &["1", "2"]]));
        assert_eq!(a, b);
    }
}
