use std::path::Path;

use eframe::egui::Color32;
use rusty_sift::{apply_filter, CoercedTable, FilterSpec, Table};

use crate::chart::ChartKind;
use crate::color::DEFAULT_CHART_COLOR;
use crate::loader::load_file;
use crate::summary::{analysis_prompt, data_summary, SAMPLE_ROWS};

// ---------------------------------------------------------------------------
// Chart settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub kind: ChartKind,
    pub x: Option<String>,
    pub y: Option<String>,
    pub color: Color32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            kind: ChartKind::Histogram,
            x: None,
            y: None,
            color: DEFAULT_CHART_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis history
// ---------------------------------------------------------------------------

/// One analysis request. The history is append-only for the process
/// lifetime; `seq` starts at 1.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub seq: u64,
    pub file_name: String,
    pub question: String,
    pub prompt: String,
    pub sample: Table,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Name of the loaded file.
    pub file_name: Option<String>,

    /// Ingested table (None until user loads a file).
    pub table: Option<CoercedTable>,

    /// Active range filter; None when the table has no numeric column.
    pub filter: Option<FilterSpec>,

    /// Rows passing the current filter (cached).
    pub filtered: Table,

    /// Question typed by the user for the next analysis.
    pub question: String,

    pub chart: ChartSettings,

    pub history: Vec<HistoryEntry>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a file from disk and make it the current table. Errors end up in
    /// the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok((file_name, table)) => {
                log::info!(
                    "Loaded {file_name}: {} rows, columns {:?}",
                    table.len(),
                    table.column_names()
                );
                self.set_table(file_name, table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Install a newly ingested table, initialise filter and chart axes.
    pub fn set_table(&mut self, file_name: String, table: CoercedTable) {
        // Default filter: first numeric column over its full range.
        self.filter = table
            .numeric_columns()
            .into_iter()
            .find_map(|col| FilterSpec::full_range(&table, col));

        let names = table.column_names();
        self.chart.x = names.first().map(|s| s.to_string());
        self.chart.y = names.get(1).or(names.first()).map(|s| s.to_string());

        self.file_name = Some(file_name);
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `filtered` after a filter change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            self.filtered = Table::default();
            return;
        };
        self.filtered = match &self.filter {
            Some(spec) => apply_filter(table, spec),
            None => (**table).clone(),
        };
    }

    /// Switch the filter to another column, spanning its full range.
    pub fn set_filter_column(&mut self, column: &str) {
        if let Some(table) = &self.table {
            if let Some(spec) = FilterSpec::full_range(table, column) {
                self.filter = Some(spec);
                self.refilter();
            }
        }
    }

    /// Update the filter bounds, keeping `lower <= upper`.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) {
        if let Some(spec) = &mut self.filter {
            spec.lower = lower.min(upper);
            spec.upper = upper.max(lower);
            self.refilter();
        }
    }

    /// Text summary of the filtered rows.
    pub fn summary(&self) -> Option<String> {
        self.table.as_ref()?;
        Some(data_summary(&self.filtered))
    }

    /// Append an analysis of the filtered rows to the history and return its
    /// prompt text.
    pub fn record_analysis(&mut self) -> Option<&HistoryEntry> {
        let summary = self.summary()?;
        let entry = HistoryEntry {
            seq: self.history.len() as u64 + 1,
            file_name: self.file_name.clone().unwrap_or_default(),
            question: self.question.trim().to_string(),
            prompt: analysis_prompt(self.question.trim(), &summary),
            sample: self.filtered.head(SAMPLE_ROWS),
        };
        log::info!("Recorded analysis #{} for {}", entry.seq, entry.file_name);
        self.history.push(entry);
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_sift::ingest;

    fn loaded(csv: &str) -> AppState {
        let mut state = AppState::default();
        state.set_table("t.csv".to_string(), ingest(csv.as_bytes(), "t.csv").unwrap());
        state
    }

    #[test]
    fn set_table_picks_first_numeric_column() {
        let state = loaded("name,age,score\nann,30,1.5\nbob,40,2.5\n");
        assert_eq!(state.filter, Some(FilterSpec::new("age", 30.0, 40.0)));
        assert_eq!(state.filtered.len(), 2);
        assert_eq!(state.chart.x.as_deref(), Some("name"));
        assert_eq!(state.chart.y.as_deref(), Some("age"));
    }

    #[test]
    fn no_numeric_column_means_no_filter() {
        let state = loaded("name\nann\nbob\n");
        assert_eq!(state.filter, None);
        assert_eq!(state.filtered.len(), 2);
        assert_eq!(state.chart.y.as_deref(), Some("name"));
    }

    #[test]
    fn bounds_and_column_switch_refilter() {
        let mut state = loaded("a,b\n1,10\n2,20\n3,30\n");
        state.set_bounds(3.0, 2.0);
        assert_eq!(state.filter, Some(FilterSpec::new("a", 2.0, 3.0)));
        assert_eq!(state.filtered.len(), 2);

        state.set_filter_column("b");
        assert_eq!(state.filter, Some(FilterSpec::new("b", 10.0, 30.0)));
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn history_is_append_only_with_sequence_numbers() {
        let mut state = loaded("a\n1\n2\n3\n4\n");
        assert!(AppState::default().record_analysis().is_none());

        state.question = "  trend? ".to_string();
        let first = state.record_analysis().unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(first.question, "trend?");
        assert_eq!(first.sample.len(), SAMPLE_ROWS);
        assert!(first.prompt.contains("Shape: (4, 1)"));

        state.set_bounds(1.0, 2.0);
        let second = state.record_analysis().unwrap();
        assert_eq!(second.seq, 2);
        assert!(second.prompt.contains("Shape: (2, 1)"));
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn load_errors_go_to_status() {
        let mut state = AppState::default();
        state.load_path(Path::new("/no/such/file.json"));
        assert!(state.table.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error: reading /no/such/file.json")));
    }
}
