//! Payload parsing for CSV and JSON import files.
//!
//! CSV support is deliberately minimal: the first line holds the headers,
//! fields are split on every comma and one pair of surrounding double
//! quotes is stripped. Embedded commas and escaped quotes are not
//! supported.

use serde_json::{Map, Value};
use thiserror::Error;

use super::ImportRow;

/// Payload encoding, chosen from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Csv,
    Json,
}

impl PayloadFormat {
    /// Pick the format from a `.csv` or `.json` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::UnsupportedFormat`] for any other name.
    ///
    /// # Examples
    /// ```
    /// use platesnap_admin::domain::import::PayloadFormat;
    ///
    /// assert_eq!(PayloadFormat::from_file_name("blocks.csv"), Ok(PayloadFormat::Csv));
    /// assert!(PayloadFormat::from_file_name("blocks.xlsx").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> Result<Self, PayloadError> {
        if name.ends_with(".json") {
            Ok(Self::Json)
        } else if name.ends_with(".csv") {
            Ok(Self::Csv)
        } else {
            Err(PayloadError::UnsupportedFormat)
        }
    }

    /// Parse `text` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the text is not valid for the format.
    pub fn parse(self, text: &str) -> Result<Vec<ImportRow>, PayloadError> {
        match self {
            Self::Csv => Ok(parse_csv(text)),
            Self::Json => parse_json(text),
        }
    }
}

/// Errors raised before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("only CSV or JSON files are supported")]
    UnsupportedFormat,
    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },
    #[error("JSON payload must be an array of objects")]
    NotAnArrayOfObjects,
}

/// Parse CSV text into rows of string values.
///
/// Fewer than two lines yields no rows. Fully blank lines are skipped and
/// cells missing at the end of a line read as empty strings.
pub fn parse_csv(text: &str) -> Vec<ImportRow> {
    let mut lines = text.trim().split('\n');
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = split_line(header_line).collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut values = split_line(line);
            let fields: Map<String, Value> = headers
                .iter()
                .map(|header| {
                    let value = values.next().unwrap_or_default();
                    (header.clone(), Value::String(value))
                })
                .collect();
            ImportRow::new(fields)
        })
        .collect()
}

fn split_line(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(',').map(strip_quotes)
}

fn strip_quotes(cell: &str) -> String {
    let trimmed = cell.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_owned()
}

/// Parse a JSON array of objects into rows.
///
/// # Errors
///
/// Returns [`PayloadError::InvalidJson`] for malformed JSON and
/// [`PayloadError::NotAnArrayOfObjects`] for any other shape.
pub fn parse_json(text: &str) -> Result<Vec<ImportRow>, PayloadError> {
    let value: Value = serde_json::from_str(text).map_err(|error| PayloadError::InvalidJson {
        message: error.to_string(),
    })?;
    let Value::Array(items) = value else {
        return Err(PayloadError::NotAnArrayOfObjects);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => Ok(ImportRow::new(fields)),
            _ => Err(PayloadError::NotAnArrayOfObjects),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Parsing edge cases for both payload formats.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("blocks.json", Ok(PayloadFormat::Json))]
    #[case("blocks.csv", Ok(PayloadFormat::Csv))]
    #[case("blocks.CSV", Err(PayloadError::UnsupportedFormat))]
    #[case("blocks.txt", Err(PayloadError::UnsupportedFormat))]
    fn format_follows_extension(
        #[case] name: &str,
        #[case] expected: Result<PayloadFormat, PayloadError>,
    ) {
        assert_eq!(PayloadFormat::from_file_name(name), expected);
    }

    #[test]
    fn csv_strips_quotes_and_whitespace() {
        let rows = parse_csv("code,\"name\" ,totalFloors\r\n\"a\", Block A ,30\r\n");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.text("code"), "a");
        assert_eq!(row.text("name"), "Block A");
        assert_eq!(row.text("totalFloors"), "30");
    }

    #[test]
    fn csv_fills_missing_cells_with_empty_strings() {
        let rows = parse_csv("code,name,description\nB,Lotus");
        assert_eq!(rows[0].text("description"), "");
        assert_eq!(rows[0].optional_text("description"), None);
    }

    #[test]
    fn csv_does_not_unescape_embedded_commas() {
        let rows = parse_csv("code,name\nC,\"Jasmine, South\"");
        assert_eq!(rows[0].text("name"), "Jasmine");
    }

    #[rstest]
    #[case("")]
    #[case("code,name")]
    #[case("   \n  ")]
    fn csv_without_data_lines_yields_nothing(#[case] text: &str) {
        assert!(parse_csv(text).is_empty());
    }

    #[test]
    fn json_keeps_native_types() {
        let rows = parse_json(r#"[{"code": "A", "totalFloors": 30, "isOwner": true}]"#)
            .expect("valid payload");
        assert_eq!(rows[0].count_or("totalFloors", 20), 30);
        assert!(rows[0].is_true("isOwner"));
    }

    #[rstest]
    #[case("{\"code\": \"A\"}", PayloadError::NotAnArrayOfObjects)]
    #[case("[1, 2]", PayloadError::NotAnArrayOfObjects)]
    fn json_rejects_other_shapes(#[case] text: &str, #[case] expected: PayloadError) {
        assert_eq!(parse_json(text), Err(expected));
    }

    #[test]
    fn json_reports_syntax_errors() {
        assert!(matches!(
            parse_json("[{"),
            Err(PayloadError::InvalidJson { .. })
        ));
    }
}
