use serde::{Deserialize, Serialize};

use super::model::{ColumnKind, Table};

// ---------------------------------------------------------------------------
// Filter predicate: closed range on one numeric column
// ---------------------------------------------------------------------------

/// Keep rows whose value in `column` lies in `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub column: String,
    pub lower: f64,
    pub upper: f64,
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, lower: f64, upper: f64) -> Self {
        FilterSpec {
            column: column.into(),
            lower,
            upper,
        }
    }

    /// A spec covering the column's whole observed range, if the column is
    /// numeric and has values.
    pub fn full_range(table: &Table, column: &str) -> Option<Self> {
        let (lower, upper) = table.value_range(column)?;
        Some(FilterSpec::new(column, lower, upper))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Return indices of rows that pass `spec`, or `None` when the spec cannot
/// apply to this table:
/// * bounds are inverted or NaN
/// * the column is absent
/// * the column is not numeric, or has no numbers at all
///
/// Missing cells never pass.
pub fn filtered_indices(table: &Table, spec: &FilterSpec) -> Option<Vec<usize>> {
    if spec.lower.is_nan() || spec.upper.is_nan() || spec.lower > spec.upper {
        return None;
    }
    let column = table.column(&spec.column)?;
    if column.kind() != ColumnKind::Numeric || column.numbers().next().is_none() {
        return None;
    }

    Some(
        column
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_f64().is_some_and(|v| spec.contains(v)))
            .map(|(i, _)| i)
            .collect(),
    )
}

/// Apply `spec` to `table`. Total: when the spec cannot apply, the result is
/// an unchanged copy of the input.
pub fn filter(table: &Table, spec: &FilterSpec) -> Table {
    match filtered_indices(table, spec) {
        Some(indices) => table.select_rows(&indices),
        None => {
            log::warn!(
                "Range filter on {:?} [{}, {}] does not apply; keeping all {} rows",
                spec.column,
                spec.lower,
                spec.upper,
                table.len()
            );
            table.clone()
        }
    }
}
