//! JSON document output.
//!
//! All three artifacts share the same shape: pretty-printed UTF-8 JSON with
//! exactly one trailing newline, non-ASCII preserved.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Render a document as pretty-printed JSON with a trailing newline
pub fn to_pretty_string<T: Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Write a document to a file
pub fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = to_pretty_string(value)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CodeMap;

    #[test]
    fn test_pretty_with_trailing_newline() {
        let mut mapping = CodeMap::new();
        mapping.insert("w1", "Project One");
        let text = to_pretty_string(&mapping).unwrap();
        assert_eq!(text, "{\n  \"w1\": \"Project One\"\n}\n");
    }

    #[test]
    fn test_non_ascii_preserved() {
        let mut mapping = CodeMap::new();
        mapping.insert("w1", "作品一");
        let text = to_pretty_string(&mapping).unwrap();
        assert!(text.contains("作品一"));
    }
}
