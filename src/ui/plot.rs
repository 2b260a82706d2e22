use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::chart::{column_values, histogram, xy_series, ChartError, ChartKind, HISTOGRAM_BINS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart controls + plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart controls and the chart for the filtered rows.
pub fn chart_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Interactive Visualization");
    let columns: Vec<String> = state
        .filtered
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    ui.columns(2, |cols| {
        egui::ComboBox::from_id_salt("chart_kind")
            .selected_text(state.chart.kind.label())
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut state.chart.kind, kind, kind.label());
                }
            });
        axis_combo(&mut cols[0], "x_axis", "X Axis", &columns, &mut state.chart.x);

        if state.chart.kind.needs_y() {
            axis_combo(&mut cols[1], "y_axis", "Y Axis", &columns, &mut state.chart.y);
        }
        cols[1].horizontal(|ui: &mut Ui| {
            ui.label("Chart Color");
            ui.color_edit_button_srgba(&mut state.chart.color);
        });
    });

    ui.add_space(6.0);
    if let Err(e) = draw_chart(ui, state) {
        ui.colored_label(Color32::YELLOW, format!("Visualization error: {e}"));
    }
}

fn axis_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    columns: &[String],
    selected: &mut Option<String>,
) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(format!("{label}: {}", selected.as_deref().unwrap_or("–")))
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui
                    .selectable_label(selected.as_deref() == Some(col.as_str()), col)
                    .clicked()
                {
                    *selected = Some(col.clone());
                }
            }
        });
}

fn draw_chart(ui: &mut Ui, state: &AppState) -> Result<(), ChartError> {
    let table = &state.filtered;
    let color = state.chart.color;
    let x = state.chart.x.as_deref().unwrap_or_default();
    let y = state.chart.y.as_deref().unwrap_or_default();

    match state.chart.kind {
        ChartKind::Histogram => {
            let values = column_values(table, x)?;
            let bars: Vec<Bar> = histogram(&values, HISTOGRAM_BINS)
                .iter()
                .map(|bin| Bar::new(bin.center(), bin.count as f64).width(bin.width()))
                .collect();
            let chart = BarChart::new(bars).color(color).name(x);
            Plot::new("chart")
                .height(320.0)
                .x_axis_label(x)
                .y_axis_label("count")
                .show(ui, |plot_ui| plot_ui.bar_chart(chart));
        }
        ChartKind::Line => {
            let series = xy_series(table, x, y)?;
            let points: PlotPoints = series.points.into_iter().collect();
            let line = Line::new(points).color(color).width(1.5).name(y);
            Plot::new("chart")
                .height(320.0)
                .x_axis_label(x)
                .y_axis_label(y)
                .show(ui, |plot_ui| plot_ui.line(line));
        }
        ChartKind::Bar => {
            let series = xy_series(table, x, y)?;
            let labels = series.labels.unwrap_or_default();
            let bars: Vec<Bar> = series
                .points
                .iter()
                .enumerate()
                .map(|(i, &[bx, by])| {
                    let bar = Bar::new(bx, by).width(0.8);
                    match labels.get(i) {
                        Some(label) => bar.name(label),
                        None => bar,
                    }
                })
                .collect();
            let chart = BarChart::new(bars).color(color).name(y);
            Plot::new("chart")
                .height(320.0)
                .x_axis_label(x)
                .y_axis_label(y)
                .show(ui, |plot_ui| plot_ui.bar_chart(chart));
        }
    }
    Ok(())
}
