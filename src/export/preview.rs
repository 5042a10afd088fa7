//! CSV preview of an export artifact.
//!
//! The server renders the export; this only splits it into a header and rows
//! for display. Quoting follows RFC 4180: fields may be wrapped in double
//! quotes, `""` inside a quoted field is a literal quote, and quoted fields may
//! span lines.

use crate::error::{KometroError, Result};
use serde::Serialize;

/// Parsed CSV content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvPreview {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvPreview {
    /// Parse CSV text. The first record is the header.
    pub fn parse(content: &str) -> Result<Self> {
        let mut records = parse_records(content)?.into_iter();
        let header = records.next().unwrap_or_default();
        Ok(Self {
            header,
            rows: records.collect(),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest record, header included.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just saw a `"` inside a quoted field
    QuoteInQuoted,
}

fn parse_records(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = State::FieldStart;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match (state, c) {
            (State::Quoted, '"') => state = State::QuoteInQuoted,
            (State::Quoted, _) => field.push(c),
            (State::QuoteInQuoted, '"') => {
                field.push('"');
                state = State::Quoted;
            }
            (State::FieldStart, '"') => state = State::Quoted,
            (_, ',') => {
                record.push(std::mem::take(&mut field));
                state = State::FieldStart;
            }
            (_, '\r') if chars.peek() == Some(&'\n') => {}
            // Blank line
            (State::FieldStart, '\n' | '\r') if record.is_empty() => {}
            (_, '\n' | '\r') => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                state = State::FieldStart;
            }
            (State::QuoteInQuoted, _) => {
                return Err(KometroError::parse(
                    "CSV",
                    format!("unexpected character {c:?} after closing quote"),
                ));
            }
            (State::FieldStart | State::Unquoted, _) => {
                field.push(c);
                state = State::Unquoted;
            }
        }
    }

    if state == State::Quoted {
        return Err(KometroError::parse("CSV", "unterminated quoted field"));
    }

    // Last record without a trailing newline
    if !field.is_empty() || !record.is_empty() || state == State::QuoteInQuoted {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let preview = CsvPreview::parse("a,b\n1,2").unwrap();
        assert_eq!(preview.header, vec!["a", "b"]);
        assert_eq!(preview.rows, vec![vec!["1", "2"]]);
        assert_eq!(preview.column_count(), 2);
    }

    #[test]
    fn test_quoted_fields() {
        let content = "codigo,titulo\r\n\"PQ-01\",\"Manual, \"\"geral\"\"\"\r\n\"IT-02\",\"linha\nquebrada\"\r\n";
        let preview = CsvPreview::parse(content).unwrap();
        assert_eq!(preview.row_count(), 2);
        assert_eq!(preview.rows[0][1], "Manual, \"geral\"");
        assert_eq!(preview.rows[1][1], "linha\nquebrada");
    }

    #[test]
    fn test_empty_fields_kept() {
        let preview = CsvPreview::parse("a,b,c\n,,\n").unwrap();
        assert_eq!(preview.rows, vec![vec!["", "", ""]]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let preview = CsvPreview::parse("a,b\n\n1,2\n\n").unwrap();
        assert_eq!(preview.header, vec!["a", "b"]);
        assert_eq!(preview.rows, vec![vec!["1", "2"]]);

        let preview = CsvPreview::parse("a\r\n\r\n\"\"\r\n").unwrap();
        assert_eq!(preview.rows, vec![vec![""]]);
    }

    #[test]
    fn test_empty_content() {
        let preview = CsvPreview::parse("").unwrap();
        assert!(preview.is_empty());
        assert_eq!(preview.column_count(), 0);
    }

    #[test]
    fn test_bom_is_stripped() {
        let preview = CsvPreview::parse("\u{feff}a,b\n").unwrap();
        assert_eq!(preview.header, vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        assert!(CsvPreview::parse("a\n\"open").is_err());
        assert!(CsvPreview::parse("\"a\"x,b").is_err());
    }
}
