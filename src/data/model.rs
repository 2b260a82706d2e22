use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use super::error::TableError;

// ---------------------------------------------------------------------------
// Cell – a single value in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Every reader produces only these three shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => write!(f, "NaN"),
        }
    }
}

impl Cell {
    /// Interpret the cell as an `f64`; only numbers qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Whether a column holds only numbers (or missing values) or anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    /// A column is numeric when none of its cells is text.
    /// An all-missing column counts as numeric.
    pub fn kind(&self) -> ColumnKind {
        if self.cells.iter().any(|c| matches!(c, Cell::Text(_))) {
            ColumnKind::Text
        } else {
            ColumnKind::Numeric
        }
    }

    /// Iterate over the numeric values of the column, skipping missing cells.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(Cell::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Table – ordered columns of equal length
// ---------------------------------------------------------------------------

/// Column-major table. Every column has exactly `n_rows` cells; the set of
/// column names is fixed once the table is built.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from a header and row-major cells.
    ///
    /// Short rows are padded with [`Cell::Missing`]; a row longer than the
    /// header is rejected.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let width = names.len();
        let n_rows = rows.len();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(n_rows)))
            .collect();

        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(TableError::RowTooLong {
                    row: row_no,
                    expected: width,
                    found: row.len(),
                });
            }
            let found = row.len();
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
            for col in columns.iter_mut().skip(found) {
                col.cells.push(Cell::Missing);
            }
        }

        Ok(Table { columns, n_rows })
    }

    /// Build a table from whole columns. All columns must have `n_rows` cells.
    pub(crate) fn from_columns(columns: Vec<Column>, n_rows: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.cells.len() == n_rows));
        Table { columns, n_rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// `(rows, columns)`, in the order a dataframe would report it.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// First column with the given name. Duplicate CSV headers are kept, so
    /// later columns of the same name are only reachable via [`Table::columns`].
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column(name).map(Column::kind)
    }

    /// Names of the numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Smallest and largest number in a numeric column, if it has any.
    pub fn value_range(&self, name: &str) -> Option<(f64, f64)> {
        let col = self.column(name)?;
        if col.kind() != ColumnKind::Numeric {
            return None;
        }
        col.numbers().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Cells of row `index`, one per column.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[index]).collect())
    }

    /// The first `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        let keep = n.min(self.n_rows);
        self.select_rows(&(0..keep).collect::<Vec<_>>())
    }

    /// A new table holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Column::new(
                    c.name.clone(),
                    indices.iter().map(|&i| c.cells[i].clone()).collect(),
                )
            })
            .collect();
        Table::from_columns(columns, indices.len())
    }
}

// ---------------------------------------------------------------------------
// CoercedTable – output of the column coercer
// ---------------------------------------------------------------------------

/// A table whose columns have been through numeric coercion. Only the
/// coercer constructs it; read access goes through `Deref<Target = Table>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CoercedTable(Table);

impl CoercedTable {
    pub(crate) fn new(table: Table) -> Self {
        CoercedTable(table)
    }

    pub fn into_inner(self) -> Table {
        self.0
    }
}

impl Deref for CoercedTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.0
    }
}
