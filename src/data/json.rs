use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};

use super::error::{ParseError, ReadError};
use super::encoding::TextEncoding;
use super::format::FormatKind;
use super::model::{Cell, Column, Table};
use super::{read_text_with_fallback, IngestOptions};

/// Column name used when the payload is a scalar rather than an object.
pub const SCALAR_COLUMN: &str = "value";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read JSON bytes of unknown encoding into a table.
pub fn read(bytes: &[u8], options: &IngestOptions) -> Result<(TextEncoding, Table), ReadError> {
    read_text_with_fallback(FormatKind::Json, bytes, options, parse)
}

/// Parse decoded JSON text and flatten its tabular payload.
pub fn parse(text: &str) -> Result<Table, ParseError> {
    let root: JsonValue = serde_json::from_str(text)?;
    Ok(flatten_document(&root))
}

// ---------------------------------------------------------------------------
// Shape detection
// ---------------------------------------------------------------------------

/// The part of a document that becomes the table.
#[derive(Debug, PartialEq)]
pub enum Payload<'a> {
    /// Top-level array: one row per element.
    Records(&'a [JsonValue]),
    /// First array-valued field of a top-level object. Sibling fields are
    /// dropped.
    NestedRecords {
        field: &'a str,
        records: &'a [JsonValue],
    },
    /// Top-level object without array fields: a single row.
    SingleObject(&'a Map<String, JsonValue>),
    /// Bare scalar: a single cell.
    Scalar(&'a JsonValue),
}

/// Decide which part of `root` holds the rows. The checks run in order:
/// top-level array, first array field of an object (in document order),
/// the object itself, then a bare scalar.
pub fn detect_payload(root: &JsonValue) -> Payload<'_> {
    match root {
        JsonValue::Array(items) => Payload::Records(items),
        JsonValue::Object(map) => map
            .iter()
            .find_map(|(field, value)| {
                value.as_array().map(|records| Payload::NestedRecords {
                    field: field.as_str(),
                    records: records.as_slice(),
                })
            })
            .unwrap_or(Payload::SingleObject(map)),
        scalar => Payload::Scalar(scalar),
    }
}

/// Flatten a whole document according to [`detect_payload`].
pub fn flatten_document(root: &JsonValue) -> Table {
    match detect_payload(root) {
        Payload::Records(records) | Payload::NestedRecords { records, .. } => {
            flatten_records(records)
        }
        Payload::SingleObject(_) => flatten_records(std::slice::from_ref(root)),
        Payload::Scalar(value) => Table::from_columns(
            vec![Column::new(SCALAR_COLUMN, vec![json_to_cell(value)])],
            1,
        ),
    }
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

/// One row per record. Columns appear in first-seen order; a record lacking
/// a column gets a missing cell.
pub fn flatten_records(records: &[JsonValue]) -> Table {
    let mut columns: Vec<Column> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for (row_no, record) in records.iter().enumerate() {
        for (name, cell) in flatten_record(record) {
            let idx = match position.get(&name) {
                Some(&idx) => idx,
                None => {
                    position.insert(name.clone(), columns.len());
                    columns.push(Column::new(name, vec![Cell::Missing; row_no]));
                    columns.len() - 1
                }
            };
            let cells = &mut columns[idx].cells;
            // Dotted paths can collide ({"a.b": 1, "a": {"b": 2}}); the later
            // value wins.
            if cells.len() > row_no {
                cells[row_no] = cell;
            } else {
                cells.push(cell);
            }
        }
        for col in &mut columns {
            if col.cells.len() <= row_no {
                col.cells.push(Cell::Missing);
            }
        }
    }

    Table::from_columns(columns, records.len())
}

/// Flatten one record into `(dotted path, cell)` pairs.
fn flatten_record(record: &JsonValue) -> Vec<(String, Cell)> {
    let mut out = Vec::new();
    match record {
        JsonValue::Object(map) => flatten_object("", map, &mut out),
        JsonValue::Null => {}
        other => out.push((SCALAR_COLUMN.to_string(), json_to_cell(other))),
    }
    out
}

fn flatten_object(prefix: &str, map: &Map<String, JsonValue>, out: &mut Vec<(String, Cell)>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            JsonValue::Object(inner) if !inner.is_empty() => flatten_object(&path, inner, out),
            other => out.push((path, json_to_cell(other))),
        }
    }
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        JsonValue::Bool(b) => Cell::Text(b.to_string()),
        JsonValue::Null => Cell::Missing,
        // Arrays and empty objects are kept as compact JSON text.
        other => Cell::Text(other.to_string()),
    }
}
