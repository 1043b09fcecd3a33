//! # folio-csv
//!
//! BOM-tolerant CSV row source for folio.

mod error;
mod reader;

pub use error::{CsvError, CsvResult};
pub use reader::CsvReader;
