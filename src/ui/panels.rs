use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::table::preview_table;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and question
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    let numeric: Vec<String> = table
        .numeric_columns()
        .into_iter()
        .filter(|c| table.value_range(c).is_some())
        .map(str::to_string)
        .collect();

    match state.filter.clone() {
        Some(spec) if !numeric.is_empty() => {
            ui.strong("Filter numeric column");
            egui::ComboBox::from_id_salt("filter_column")
                .selected_text(&spec.column)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &numeric {
                        if ui.selectable_label(spec.column == *col, col).clicked() {
                            state.set_filter_column(col);
                        }
                    }
                });

            let (min, max) = state
                .table
                .as_ref()
                .and_then(|t| t.value_range(&spec.column))
                .unwrap_or((spec.lower, spec.upper));

            ui.add_space(4.0);
            ui.label(format!("Range for {}", spec.column));
            let mut lower = spec.lower;
            let mut upper = spec.upper;
            let changed_lower = ui
                .add(egui::Slider::new(&mut lower, min..=max).text("min"))
                .changed();
            let changed_upper = ui
                .add(egui::Slider::new(&mut upper, min..=max).text("max"))
                .changed();
            if changed_lower || changed_upper {
                state.set_bounds(lower, upper);
            }
        }
        _ => {
            ui.label("No numeric column to filter on.");
        }
    }

    ui.separator();
    ui.strong("Ask about your data");
    ui.add(
        egui::TextEdit::multiline(&mut state.question)
            .desired_rows(4)
            .hint_text("e.g. Which region grows fastest?"),
    );
    if ui.button("Analyze").clicked() {
        if let Some(entry) = state.record_analysis() {
            // The prompt goes to the clipboard for an external model.
            ui.ctx().copy_text(entry.prompt.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(name), Some(table)) = (&state.file_name, &state.table) {
            let (rows, cols) = table.shape();
            ui.label(format!(
                "{name}: {rows} rows × {cols} columns, {} visible",
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary and history (central panel sections)
// ---------------------------------------------------------------------------

/// Collapsible text summary of the filtered rows, with a copy button.
pub fn summary_section(ui: &mut Ui, state: &AppState) {
    let Some(summary) = state.summary() else {
        return;
    };
    egui::CollapsingHeader::new(RichText::new("Data Summary").strong())
        .id_salt("data_summary")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Copy").clicked() {
                ui.ctx().copy_text(summary.clone());
            }
            ui.monospace(&summary);
        });
}

/// Past analyses, newest first.
pub fn history_section(ui: &mut Ui, state: &AppState) {
    if state.history.is_empty() {
        return;
    }
    ui.separator();
    ui.heading("Analysis History");

    for entry in state.history.iter().rev() {
        let question: String = entry.question.chars().take(50).collect();
        let title = format!("Analysis #{}: {question}...", entry.seq);
        egui::CollapsingHeader::new(title)
            .id_salt(("history", entry.seq))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.label(format!("File: {}", entry.file_name));
                ScrollArea::vertical()
                    .id_salt(("history_prompt", entry.seq))
                    .max_height(160.0)
                    .show(ui, |ui: &mut Ui| {
                        ui.monospace(&entry.prompt);
                    });
                if ui.small_button("Copy prompt").clicked() {
                    ui.ctx().copy_text(entry.prompt.clone());
                }
                ui.push_id(("history_table", entry.seq), |ui: &mut Ui| {
                    preview_table(ui, &entry.sample, None);
                });
            });
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open data file")
        .add_filter("Supported files", &["csv", "xls", "xlsx", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xls", "xlsx"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
