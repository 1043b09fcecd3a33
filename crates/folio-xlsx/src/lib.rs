//! # folio-xlsx
//!
//! Minimal XLSX container reader for folio: shared-string table plus the
//! first worksheet's cell grid. No formulas, styles, or extra sheets.

mod error;
mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::{column_index, XlsxReader};
