use super::model::{Cell, CoercedTable, Column, Table};

/// Coerce every column of `table` independently. Never fails and never
/// touches the input.
pub fn coerce(table: &Table) -> CoercedTable {
    let columns = table.columns().iter().map(coerce_column).collect();
    CoercedTable::new(Table::from_columns(columns, table.len()))
}

/// Numeric coercion for one column.
///
/// The column becomes numeric when at least one cell parses as a number, or
/// when it holds no values at all. Cells that do not parse then become
/// missing. A column in which nothing parses is returned unchanged.
pub fn coerce_column(column: &Column) -> Column {
    let parsed: Vec<Option<f64>> = column.cells.iter().map(parse_cell).collect();

    let has_values = column.cells.iter().any(|c| !c.is_missing());
    let any_number = parsed.iter().any(Option::is_some);
    if has_values && !any_number {
        return column.clone();
    }

    let cells = parsed
        .into_iter()
        .map(|v| v.map_or(Cell::Missing, Cell::Number))
        .collect();
    Column::new(column.name.clone(), cells)
}

fn parse_cell(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(v) => Some(*v).filter(|v| !v.is_nan()),
        Cell::Text(s) => parse_number(s),
        Cell::Missing => None,
    }
}

/// Parse a decimal or scientific number, ignoring surrounding whitespace.
/// A parsed NaN counts as not a number.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}
