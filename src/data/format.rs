use std::fmt;

use serde::Serialize;

use super::error::UnsupportedFormatError;

/// The reader family a file is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatKind {
    Csv,
    Excel,
    Json,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::Csv => "CSV",
            FormatKind::Excel => "Excel",
            FormatKind::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// Pick a format from the declared filename. Suffix matching ignores case.
///
/// Supported suffixes:
/// * `.csv`          – comma-separated text
/// * `.xls`, `.xlsx` – spreadsheet workbook
/// * `.json`         – JSON document
pub fn route(filename: &str) -> Result<FormatKind, UnsupportedFormatError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".csv") {
        Ok(FormatKind::Csv)
    } else if lower.ends_with(".xls") || lower.ends_with(".xlsx") {
        Ok(FormatKind::Excel)
    } else if lower.ends_with(".json") {
        Ok(FormatKind::Json)
    } else {
        Err(UnsupportedFormatError {
            filename: filename.to_string(),
        })
    }
}
