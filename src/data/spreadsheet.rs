use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use super::error::ReadError;
use super::model::{Cell, Column, Table};

/// Read the first worksheet of an `.xls` / `.xlsx` workbook. The first row
/// is the header. Binary containers get a single attempt: no encoding
/// fallback.
pub fn read(bytes: &[u8]) -> Result<Table, ReadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ReadError::NoWorksheet)??;
    Ok(table_from_range(&range))
}

/// Convert a worksheet range into a table.
pub fn table_from_range(range: &Range<Data>) -> Table {
    let rows: Vec<&[Data]> = range.rows().collect();
    let Some((header, body)) = rows.split_first() else {
        return Table::default();
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(idx, head)| {
            let cells = body.iter().map(|row| data_to_cell(&row[idx])).collect();
            Column::new(header_name(idx, head), cells)
        })
        .collect();

    Table::from_columns(columns, body.len())
}

fn header_name(idx: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {idx}"),
        Data::String(s) if s.is_empty() => format!("Unnamed: {idx}"),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn data_to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Empty | Data::Error(_) => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn first_row_is_header() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("name".to_string()));
        range.set_value((0, 1), Data::String("score".to_string()));
        range.set_value((0, 2), Data::Empty);
        range.set_value((1, 0), Data::String("ann".to_string()));
        range.set_value((1, 1), Data::Int(7));
        range.set_value((1, 2), Data::Bool(true));
        range.set_value((2, 0), Data::String(String::new()));
        range.set_value((2, 1), Data::Float(2.5));
        range.set_value((2, 2), Data::Error(CellErrorType::Div0));

        let table = table_from_range(&range);
        assert_eq!(table.column_names(), vec!["name", "score", "Unnamed: 2"]);
        assert_eq!(
            table.column("name").unwrap().cells,
            vec![Cell::Text("ann".to_string()), Cell::Missing]
        );
        assert_eq!(
            table.column("score").unwrap().cells,
            vec![Cell::Number(7.0), Cell::Number(2.5)]
        );
        assert_eq!(
            table.column("Unnamed: 2").unwrap().cells,
            vec![Cell::Text("true".to_string()), Cell::Missing]
        );
    }

    #[test]
    fn empty_range_is_empty_table() {
        let range: Range<Data> = Range::empty();
        assert_eq!(table_from_range(&range).shape(), (0, 0));
    }

    #[test]
    fn garbage_bytes_are_a_spreadsheet_error() {
        let err = read(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, ReadError::Spreadsheet(_)));
    }
}
