use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use rusty_sift::{Cell, ColumnKind, Table};

use crate::color::{highlight_for, text_on};
use crate::state::AppState;

/// Rows shown in the preview; larger tables are truncated.
pub const PREVIEW_ROWS: usize = 500;

const ROW_HEIGHT: f32 = 18.0;

/// Index of the row holding each column's maximum (numeric columns only).
pub fn max_rows(table: &Table) -> Vec<Option<usize>> {
    table
        .columns()
        .iter()
        .map(|col| {
            if col.kind() != ColumnKind::Numeric {
                return None;
            }
            col.cells
                .iter()
                .enumerate()
                .filter_map(|(i, c)| c.as_f64().map(|v| (i, v)))
                .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                    Some((_, b)) if b >= v => best,
                    _ => Some((i, v)),
                })
                .map(|(i, _)| i)
        })
        .collect()
}

/// Render `table` as a striped grid with a row-index column. When
/// `highlight` is set, each numeric column's maximum cell gets that
/// background.
pub fn preview_table(ui: &mut Ui, table: &Table, highlight: Option<Color32>) {
    let n_rows = table.len().min(PREVIEW_ROWS);
    let maxima = highlight.map(|_| max_rows(table)).unwrap_or_default();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .column(TableColumn::auto())
        .columns(TableColumn::auto().at_least(60.0), table.columns().len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui| {
                ui.strong("");
            });
            for col in table.columns() {
                header.col(|ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, n_rows, |mut row| {
                let idx = row.index();
                row.col(|ui| {
                    ui.weak(idx.to_string());
                });
                for (c, col) in table.columns().iter().enumerate() {
                    let cell = &col.cells[idx];
                    let is_max = maxima.get(c).copied().flatten() == Some(idx);
                    row.col(|ui| {
                        let mut text = RichText::new(cell.to_string());
                        if matches!(cell, Cell::Missing) {
                            text = text.weak();
                        }
                        if let (true, Some(bg)) = (is_max, highlight) {
                            text = text.background_color(bg).color(text_on(bg));
                        }
                        ui.label(text);
                    });
                }
            });
        });

    if table.len() > n_rows {
        ui.weak(format!("… {} more rows", table.len() - n_rows));
    }
}

/// Collapsible preview of the filtered rows, maxima tinted with the chart
/// colour.
pub fn preview_section(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new(RichText::new("Preview Filtered Data").strong())
        .id_salt("preview_filtered")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            preview_table(ui, &state.filtered, Some(highlight_for(state.chart.color)));
        });
}
