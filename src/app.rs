use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: controls and charts, top to bottom ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::heading(ui);
                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(12.0);

                    if let Some(fig) = self.state.pie() {
                        plot::pie_chart(ui, fig);
                    }
                    ui.add_space(12.0);

                    panels::payload_slider(ui, &mut self.state);
                    ui.add_space(8.0);

                    if let Some(fig) = self.state.scatter() {
                        plot::scatter_chart(ui, fig);
                        panels::record_table(ui, fig);
                    }
                });
        });
    }
}
