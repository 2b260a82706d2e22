use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RustySiftApp {
    pub state: AppState,
}

impl eframe::App for RustySiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and question ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: preview, chart, history ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a file to analyze  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                table::preview_section(ui, &self.state);
                panels::summary_section(ui, &self.state);
                ui.separator();
                plot::chart_section(ui, &mut self.state);
                panels::history_section(ui, &self.state);
            });
        });
    }
}
