//! Tabular data assistant core.
//!
//! [`data`] turns a buffered file of unknown encoding (CSV, Excel or JSON)
//! into a coerced table and filters it. The desktop viewer in `main.rs` is a
//! thin consumer of this module.

pub mod data;

pub use data::error::IngestError;
pub use data::filter::FilterSpec;
pub use data::model::{Cell, CoercedTable, Column, ColumnKind, Table};
pub use data::{apply_filter, ingest, ingest_with, IngestOptions};
