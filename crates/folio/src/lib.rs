//! # folio
//!
//! Converts tabular portfolio/work-history data (an XLSX workbook or CSV
//! export) into the normalized JSON documents a front-end site consumes:
//! a code→display-name mapping, a per-entry detail store, and a
//! chronological experience dataset.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use folio::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = folio::load_rows(
//!     Path::new("all_work_list.xlsx"),
//!     Path::new("all_work_list.csv"),
//! )?;
//!
//! let details = assemble_details(&source.rows, &source.mapping);
//! document::write(Path::new("allWorkData.json"), &details)?;
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod prelude;

pub use pipeline::{load_rows, LoadedSource, PipelineError, PipelineResult, CODE_HEADER};

// Re-export core types
pub use folio_core::{
    assemble_details, assemble_experience, build_mapping, document, CodeMap, DateKey,
    DetailRecord, DetailSet, Error, ExperienceData, ExperienceEntry, ObjectEntry, Result, Row,
    RowSet,
};

// Re-export source readers
pub use folio_csv::{CsvError, CsvReader};
pub use folio_xlsx::{XlsxError, XlsxReader};
