use rusty_sift::Table;

/// Rows included in the sample section of a summary.
pub const SAMPLE_ROWS: usize = 3;

// ---------------------------------------------------------------------------
// Text summary handed to an external analysis model
// ---------------------------------------------------------------------------

/// Columns, shape and the first few rows of `table`, as plain text.
pub fn data_summary(table: &Table) -> String {
    let (rows, cols) = table.shape();
    format!(
        "Columns: {}\nShape: ({rows}, {cols})\nSample Data:\n{}",
        table.column_names().join(", "),
        to_markdown(&table.head(SAMPLE_ROWS))
    )
}

/// Render a table as a markdown grid with a leading row-index column.
pub fn to_markdown(table: &Table) -> String {
    let names = table.column_names();
    let mut out = String::new();

    out.push_str("|    |");
    for name in &names {
        out.push_str(&format!(" {name} |"));
    }
    out.push('\n');

    out.push_str("|---:|");
    for _ in &names {
        out.push_str(":---|");
    }
    out.push('\n');

    for idx in 0..table.len() {
        out.push_str(&format!("| {idx:>2} |"));
        for cell in table.row(idx).unwrap_or_default() {
            out.push_str(&format!(" {cell} |"));
        }
        out.push('\n');
    }
    out
}

/// The request text for an analysis of `summary` focused on `question`.
pub fn analysis_prompt(question: &str, summary: &str) -> String {
    format!(
        "Analyze this data for: {question}\n\
         \n\
         Data Summary:\n\
         {summary}\n\
         \n\
         Provide insights with:\n\
         - Key trends\n\
         - Anomalies\n\
         - Recommended actions\n\
         - Next analysis steps\n"
    )
}
