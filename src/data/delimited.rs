use csv::ReaderBuilder;

use super::error::{ParseError, ReadError};
use super::encoding::TextEncoding;
use super::format::FormatKind;
use super::model::{Cell, Table};
use super::{read_text_with_fallback, IngestOptions};

// ---------------------------------------------------------------------------
// Delimited text reader
// ---------------------------------------------------------------------------

/// Read comma-separated bytes of unknown encoding. The first row is the
/// header; its names are kept verbatim, duplicates included. Returns the
/// encoding that worked with the table.
pub fn read(bytes: &[u8], options: &IngestOptions) -> Result<(TextEncoding, Table), ReadError> {
    read_text_with_fallback(FormatKind::Csv, bytes, options, |text| parse(text, options))
}

/// Parse already-decoded delimited text.
///
/// * empty fields and configured missing markers become [`Cell::Missing`]
/// * rows shorter than the header are padded with missing cells
/// * a row longer than the header is an error
pub fn parse(text: &str, options: &IngestOptions) -> Result<Table, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::NoHeader);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| field_to_cell(field, &options.missing_markers))
                .collect(),
        );
    }

    Ok(Table::from_rows(names, rows)?)
}

fn field_to_cell(field: &str, missing_markers: &[String]) -> Cell {
    if field.is_empty() || missing_markers.iter().any(|m| m == field) {
        Cell::Missing
    } else {
        Cell::Text(field.to_string())
    }
}
