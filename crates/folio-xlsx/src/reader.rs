//! XLSX reader
//!
//! Reads just enough of the Office Open XML container for the pipeline: the
//! shared-string table and the first worksheet's cell grid. Formulas,
//! styles, and additional sheets are ignored.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use folio_core::RowSet;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const FIRST_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Decode a cell reference's column letters to a zero-based column index.
///
/// Letters read base-26 with `A` = 1, so `"A1"` → 0, `"Z9"` → 25,
/// `"AA1"` → 26. A reference with no letters decodes to column 0.
pub fn column_index(cell_ref: &str) -> usize {
    let mut col: usize = 0;
    for c in cell_ref.chars() {
        if !c.is_ascii_alphabetic() {
            break;
        }
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    col.saturating_sub(1)
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read the first worksheet of a container file into a raw cell grid
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<Vec<String>>> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read the first worksheet from a reader into a raw cell grid
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Vec<Vec<String>>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX container
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        Self::read_worksheet(&mut archive, &shared_strings)
    }

    /// Read a container file into a [`RowSet`] (first grid row = headers)
    pub fn read_rows_file<P: AsRef<Path>>(path: P) -> XlsxResult<RowSet> {
        Ok(RowSet::from_grid(Self::read_file(path)?))
    }

    /// Read the shared-string table, concatenating all `<t>` text under each
    /// `<si>` so multi-run rich text decodes to one string.
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name(SHARED_STRINGS_PART) {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(current_string.clone());
                        current_string.clear();
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read sheet one's rows.
    ///
    /// Cells land by their decoded column index, not by element sequence, so
    /// sparse and out-of-order `<c>` elements still reach the right columns;
    /// gaps fill with empty strings.
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        shared_strings: &[String],
    ) -> XlsxResult<Vec<Vec<String>>> {
        let file = archive
            .by_name(FIRST_SHEET_PART)
            .map_err(|_| XlsxError::MissingPart(FIRST_SHEET_PART.into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut grid: Vec<Vec<String>> = Vec::new();
        let mut current_row: Vec<String> = Vec::new();

        // Current cell state
        let mut current_col: usize = 0;
        let mut is_shared: bool = false;
        let mut current_value: String = String::new();
        let mut in_cell = false;
        let mut in_value = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row.clear();
                    }
                    b"c" => {
                        in_cell = true;
                        current_col = 0;
                        is_shared = false;
                        current_value.clear();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    if let Ok(r) = attr.unescape_value() {
                                        current_col = column_index(&r);
                                    }
                                }
                                b"t" => {
                                    is_shared = attr
                                        .unescape_value()
                                        .map_or(false, |t| t.as_ref() == "s");
                                }
                                _ => {}
                            }
                        }
                    }
                    b"v" if in_cell => {
                        in_value = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"row" => {
                        grid.push(std::mem::take(&mut current_row));
                    }
                    b"c" => {
                        let text = if is_shared {
                            Self::resolve_shared(&current_value, shared_strings)
                        } else {
                            current_value.clone()
                        };
                        if current_row.len() <= current_col {
                            current_row.resize(current_col + 1, String::new());
                        }
                        current_row[current_col] = text;
                        in_cell = false;
                    }
                    b"v" => {
                        in_value = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value => {
                    if let Ok(text) = e.unescape() {
                        current_value.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(grid)
    }

    /// Resolve a shared-string cell value through the table.
    ///
    /// Unresolvable ordinals degrade to an empty cell rather than failing
    /// the whole read.
    fn resolve_shared(value: &str, shared_strings: &[String]) -> String {
        match value.trim().parse::<usize>().ok().and_then(|i| shared_strings.get(i)) {
            Some(text) => text.clone(),
            None => {
                log::warn!("unresolvable shared-string reference: {value:?}");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), 0);
        assert_eq!(column_index("B2"), 1);
        assert_eq!(column_index("Z9"), 25);
        assert_eq!(column_index("AA1"), 26);
        assert_eq!(column_index("AB10"), 27);
        assert_eq!(column_index("BA1"), 52);
    }

    #[test]
    fn test_column_index_degenerate_refs() {
        assert_eq!(column_index(""), 0);
        assert_eq!(column_index("7"), 0);
        assert_eq!(column_index("a1"), 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        /// Encode a zero-based column index as reference letters
        fn letters(col: usize) -> String {
            let mut out = String::new();
            let mut n = col + 1;
            while n > 0 {
                n -= 1;
                out.insert(0, ((n % 26) as u8 + b'A') as char);
                n /= 26;
            }
            out
        }

        proptest! {
            #[test]
            fn column_letters_round_trip(col in 0usize..20_000) {
                let cell_ref = format!("{}{}", letters(col), 1);
                prop_assert_eq!(column_index(&cell_ref), col);
            }
        }
    }
}
