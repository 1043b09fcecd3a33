//! Source resolution: workbook first, fallback CSV second.
//!
//! Structural failures (unreadable container, missing required header, no
//! usable mapping from any source) escalate here; everything below this
//! layer degrades gracefully.

use std::path::Path;

use thiserror::Error;

use folio_core::{build_mapping, CodeMap, RowSet};
use folio_csv::{CsvError, CsvReader};
use folio_xlsx::{XlsxError, XlsxReader};

/// Header the mapping and detail transforms cannot work without
pub const CODE_HEADER: &str = "index";

/// Result type for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Structural errors that abort a run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Workbook could not be read
    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Fallback CSV could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// A source has rows but lacks a required header
    #[error("source '{path}' is missing required header '{header}'")]
    MissingHeader {
        /// Source file the header was expected in
        path: String,
        /// The absent header name
        header: String,
    },

    /// No source yielded any mapping entries
    #[error("no usable mapping entries from any source")]
    NoMapping,
}

/// Rows plus the mapping resolved for a run
#[derive(Debug, Clone)]
pub struct LoadedSource {
    /// Detail-row source (workbook rows when present, else fallback CSV rows)
    pub rows: RowSet,
    /// The resolved code→display-name mapping
    pub mapping: CodeMap,
}

/// Resolve the run's row source and mapping.
///
/// The workbook is read when it exists; a non-empty workbook without the
/// `index` header is fatal. When the workbook yields no mapping entries
/// (absent, empty, or codeless), the fallback CSV is read and its rows build
/// the mapping — the workbook's rows, when it has any, still feed the detail
/// transform. An empty mapping after both sources is fatal.
pub fn load_rows(workbook: &Path, fallback_csv: &Path) -> PipelineResult<LoadedSource> {
    let workbook_rows = if workbook.exists() {
        let rows = XlsxReader::read_rows_file(workbook)?;
        if !rows.headers().is_empty() && !rows.has_header(CODE_HEADER) {
            return Err(PipelineError::MissingHeader {
                path: workbook.display().to_string(),
                header: CODE_HEADER.to_string(),
            });
        }
        Some(rows)
    } else {
        None
    };

    let mut mapping = workbook_rows.as_ref().map(build_mapping).unwrap_or_default();
    let mut rows = workbook_rows.unwrap_or_default();

    if mapping.is_empty() && fallback_csv.exists() {
        let csv_rows = CsvReader::read_file(fallback_csv)?;
        if !csv_rows.headers().is_empty() && !csv_rows.has_header(CODE_HEADER) {
            return Err(PipelineError::MissingHeader {
                path: fallback_csv.display().to_string(),
                header: CODE_HEADER.to_string(),
            });
        }
        mapping = build_mapping(&csv_rows);
        if rows.is_empty() {
            rows = csv_rows;
        }
    }

    if mapping.is_empty() {
        return Err(PipelineError::NoMapping);
    }

    Ok(LoadedSource { rows, mapping })
}
