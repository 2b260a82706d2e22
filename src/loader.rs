use std::path::Path;

use anyhow::{Context, Result};
use rusty_sift::{ingest, CoercedTable};

/// Load a file from disk: buffer it fully, then ingest it under its file
/// name. Returns the display name alongside the table.
pub fn load_file(path: &Path) -> Result<(String, CoercedTable)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let table = ingest(&bytes, &file_name)
        .with_context(|| format!("loading {file_name}"))?;

    Ok((file_name, table))
}
