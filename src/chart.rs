use rusty_sift::{Cell, ColumnKind, Table};
use thiserror::Error;

/// Number of histogram bins.
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Line,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Histogram, ChartKind::Line, ChartKind::Bar];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
        }
    }

    /// Histograms only use the X axis.
    pub fn needs_y(self) -> bool {
        self != ChartKind::Histogram
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins spanning the finite values. A constant column gets one
/// unit-wide bin centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![Bin {
            start: min - 0.5,
            end: max + 0.5,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Numeric values of a column, missing cells dropped.
pub fn column_values(table: &Table, column: &str) -> Result<Vec<f64>, ChartError> {
    let col = table
        .column(column)
        .ok_or_else(|| ChartError::ColumnNotFound(column.to_string()))?;
    if col.kind() != ColumnKind::Numeric {
        return Err(ChartError::NotNumeric(column.to_string()));
    }
    Ok(col.numbers().collect())
}

// ---------------------------------------------------------------------------
// X/Y series
// ---------------------------------------------------------------------------

/// Points for line and bar charts. A text X axis is plotted by row position
/// and keeps the text as labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub points: Vec<[f64; 2]>,
    pub labels: Option<Vec<String>>,
}

pub fn xy_series(table: &Table, x: &str, y: &str) -> Result<Series, ChartError> {
    let x_col = table
        .column(x)
        .ok_or_else(|| ChartError::ColumnNotFound(x.to_string()))?;
    let y_col = table
        .column(y)
        .ok_or_else(|| ChartError::ColumnNotFound(y.to_string()))?;
    if y_col.kind() != ColumnKind::Numeric {
        return Err(ChartError::NotNumeric(y.to_string()));
    }

    let categorical = x_col.kind() == ColumnKind::Text;
    let mut series = Series {
        points: Vec::new(),
        labels: categorical.then(Vec::new),
    };

    for (pos, (x_cell, y_cell)) in x_col.cells.iter().zip(&y_col.cells).enumerate() {
        let Some(y_val) = y_cell.as_f64() else {
            continue;
        };
        if let Some(labels) = series.labels.as_mut() {
            labels.push(match x_cell {
                Cell::Missing => String::new(),
                other => other.to_string(),
            });
            series.points.push([pos as f64, y_val]);
        } else if let Some(x_val) = x_cell.as_f64() {
            series.points.push([x_val, y_val]);
        }
    }
    Ok(series)
}
