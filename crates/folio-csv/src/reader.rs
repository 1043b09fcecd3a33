//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use folio_core::RowSet;

/// UTF-8 byte-order mark, present in exports from some spreadsheet tools
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// CSV file reader producing the uniform row model
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file (first line = headers) into a [`RowSet`]
    pub fn read_file<P: AsRef<Path>>(path: P) -> CsvResult<RowSet> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read CSV content from a reader into a [`RowSet`].
    ///
    /// A leading UTF-8 BOM is stripped so the first header name decodes
    /// clean. Records shorter than the header pad with empty strings.
    pub fn read<R: Read>(mut reader: R) -> CsvResult<RowSet> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = match bytes.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped,
            None => &bytes[..],
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            records.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(RowSet::from_records(headers, records))
    }
}
