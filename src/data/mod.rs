/// Data layer: ingestion, normalization and filtering.
///
/// Architecture:
/// ```text
///  bytes + filename
///        │
///        ▼
///   ┌──────────┐
///   │  format   │  filename suffix → Csv | Excel | Json
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────────────────┐
///   │ delimited | json | spreadsheet │  encoding probe + parse → Table
///   └───────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  coerce   │  per-column numeric coercion → CoercedTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  closed numeric range on one column → Table
///   └──────────┘
/// ```
pub mod coerce;
pub mod delimited;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod format;
pub mod json;
pub mod model;
pub mod spreadsheet;

use encoding::{EncodingProbe, TextEncoding};
use error::{IngestError, ParseError, ReadError};
use filter::FilterSpec;
use format::FormatKind;
use model::{CoercedTable, Table};

/// Cell values read as missing from delimited text, besides the empty string.
pub const DEFAULT_MISSING_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA",
];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs for a single ingestion request.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Encodings tried, in order, for text formats.
    pub encodings: Vec<TextEncoding>,
    /// Field delimiter for delimited text.
    pub delimiter: u8,
    /// Delimited cells equal to one of these are read as missing.
    pub missing_markers: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::CANDIDATES.to_vec(),
            delimiter: b',',
            missing_markers: DEFAULT_MISSING_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl IngestOptions {
    pub fn probe(&self) -> EncodingProbe {
        EncodingProbe::new(self.encodings.clone())
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Ingest a fully buffered file with default options.
pub fn ingest(bytes: &[u8], filename: &str) -> Result<CoercedTable, IngestError> {
    ingest_with(&IngestOptions::default(), bytes, filename)
}

/// Route by filename, read, then coerce. The format is chosen once; a read
/// failure is never retried as a different format.
pub fn ingest_with(
    options: &IngestOptions,
    bytes: &[u8],
    filename: &str,
) -> Result<CoercedTable, IngestError> {
    let format = format::route(filename)?;

    let (encoding, table) = match format {
        FormatKind::Csv => {
            let (encoding, table) = delimited::read(bytes, options)?;
            (Some(encoding), table)
        }
        FormatKind::Json => {
            let (encoding, table) = json::read(bytes, options)?;
            (Some(encoding), table)
        }
        FormatKind::Excel => (None, spreadsheet::read(bytes)?),
    };

    let coerced = coerce::coerce(&table);
    let (rows, cols) = coerced.shape();
    let encoding = encoding.map_or("binary", TextEncoding::label);
    log::info!(
        "Ingested {filename:?} as {format} ({encoding}): {rows} rows x {cols} columns, \
         numeric columns {:?}",
        coerced.numeric_columns()
    );
    Ok(coerced)
}

/// Restrict a coerced table to the rows selected by `spec`.
pub fn apply_filter(table: &CoercedTable, spec: &FilterSpec) -> Table {
    filter::filter(table, spec)
}

/// Decode with each candidate encoding in turn and return the first text
/// that also parses, together with the encoding that produced it.
pub(crate) fn read_text_with_fallback<F>(
    format: FormatKind,
    bytes: &[u8],
    options: &IngestOptions,
    parse: F,
) -> Result<(TextEncoding, Table), ReadError>
where
    F: Fn(&str) -> Result<Table, ParseError>,
{
    let probe = options.probe();
    let mut last_error = None;

    for (encoding, text) in probe.decodings(bytes) {
        match parse(&text) {
            Ok(table) => {
                log::debug!("Parsed {format} input decoded as {encoding}");
                return Ok((encoding, table));
            }
            Err(e) => {
                log::debug!("Parsing {format} input decoded as {encoding} failed: {e}");
                last_error = Some(e);
            }
        }
    }

    Err(ReadError::NoEncodingWorked { format, last_error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    #[test]
    fn routes_and_coerces_json() {
        let table = ingest(br#"[{"a": "1"}, {"a": "x"}]"#, "rows.JSON").unwrap();
        assert_eq!(
            table.column("a").unwrap().cells,
            vec![Cell::Number(1.0), Cell::Missing]
        );
    }

    #[test]
    fn unsupported_suffix_wins_over_content() {
        let err = ingest(b"a,b\n1,2\n", "data.txt").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));
    }

    #[test]
    fn custom_delimiter() {
        let options = IngestOptions {
            delimiter: b';',
            ..IngestOptions::default()
        };
        let table = ingest_with(&options, b"a;b\n1;2\n", "semi.csv").unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn fallback_reports_last_parse_error() {
        let err = read_text_with_fallback(
            FormatKind::Json,
            b"{not json",
            &IngestOptions::default(),
            json::parse,
        )
        .unwrap_err();
        match err {
            ReadError::NoEncodingWorked {
                format,
                last_error: Some(ParseError::Json(_)),
            } => assert_eq!(format, FormatKind::Json),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fallback_returns_winning_encoding() {
        let options = IngestOptions::default();
        let (encoding, table) =
            read_text_with_fallback(FormatKind::Csv, b"a\n\x80\n", &options, |text| {
                delimited::parse(text, &options)
            })
            .unwrap();
        assert_eq!(encoding, TextEncoding::Windows1252);
        assert_eq!(table.column("a").unwrap().cells, vec![Cell::from("€")]);
    }

    #[test]
    fn fallback_without_any_decoding() {
        let options = IngestOptions {
            encodings: vec![TextEncoding::Utf8],
            ..IngestOptions::default()
        };
        let err =
            read_text_with_fallback(FormatKind::Csv, b"\xFF", &options, |_| Ok(Table::default()))
                .unwrap_err();
        assert!(matches!(
            err,
            ReadError::NoEncodingWorked {
                last_error: None,
                ..
            }
        ));
    }
}
