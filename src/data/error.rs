//! Error taxonomy for ingestion. Coercion and filtering are total and have no
//! error type of their own.

use thiserror::Error;

use super::format::FormatKind;

/// No candidate encoding produced plausible text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("no candidate encoding could decode the input")]
    AllCandidatesFailed,
}

/// The declared filename has no recognized suffix.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported file format: {filename:?} (expected .csv, .xls, .xlsx or .json)")]
pub struct UnsupportedFormatError {
    pub filename: String,
}

/// Structural problems found while assembling a table from rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("row {row} has {found} fields but the header has {expected}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Why one decoded text could not be parsed. Readers move on to the next
/// candidate encoding when they see one of these.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no header row")]
    NoHeader,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A reader failed. Nothing is returned on failure, never a partial table.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Every candidate encoding either failed to decode or produced text that
    /// did not parse.
    #[error("unable to read {format} data with any candidate encoding{}", describe_last(.last_error))]
    NoEncodingWorked {
        format: FormatKind,
        last_error: Option<ParseError>,
    },

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("spreadsheet contains no worksheets")]
    NoWorksheet,
}

fn describe_last(last_error: &Option<ParseError>) -> String {
    match last_error {
        Some(e) => format!(" (last error: {e})"),
        None => String::new(),
    }
}

/// Everything `ingest` can fail with.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error(transparent)]
    Read(#[from] ReadError),
}
