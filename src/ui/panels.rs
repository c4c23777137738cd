use eframe::egui::{self, Align, Color32, Layout, RichText, Slider, Ui};
use egui_extras::{Column, TableBuilder};

use crate::callbacks::{ControlEvent, ControlId};
use crate::chart::ScatterFigure;
use crate::data::query::{PayloadRange, SiteFilter};
use crate::settings;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Heading and controls
// ---------------------------------------------------------------------------

pub fn heading(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(settings::DASHBOARD_TITLE)
                .size(settings::TITLE_SIZE)
                .color(settings::TITLE_COLOR)
                .strong(),
        );
    });
}

/// Launch site selector: "All Sites" followed by every site in the dataset.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let current = state.controls.site.clone();
    let mut picked: Option<SiteFilter> = None;

    egui::ComboBox::from_id_salt(ControlId::SiteDropdown.id())
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteFilter::All, SiteFilter::All.label())
                .clicked()
            {
                picked = Some(SiteFilter::All);
            }
            for site in state.dataset.sites() {
                if ui
                    .selectable_label(current.value() == site.as_str(), site)
                    .clicked()
                {
                    picked = Some(SiteFilter::from_value(site));
                }
            }
        });

    if let Some(site) = picked {
        state.handle(ControlEvent::SiteSelected(site));
    }
}

/// Payload range control over the slider span. egui has no two-handle
/// slider, so the bounds get one slider each and are kept from crossing.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.label("Payload range (Kg):");

    let span = settings::PAYLOAD_SLIDER_MIN..=settings::PAYLOAD_SLIDER_MAX;
    let mut lower = state.controls.payload.lower();
    let mut upper = state.controls.payload.upper();

    let lower_changed = ui
        .add(
            Slider::new(&mut lower, span.clone())
                .step_by(settings::PAYLOAD_SLIDER_STEP)
                .text("min"),
        )
        .changed();
    let upper_changed = ui
        .add(
            Slider::new(&mut upper, span)
                .step_by(settings::PAYLOAD_SLIDER_STEP)
                .text("max"),
        )
        .changed();
    slider_marks(ui);

    if !(lower_changed || upper_changed) {
        return;
    }
    if lower > upper {
        if lower_changed {
            upper = lower;
        } else {
            lower = upper;
        }
    }
    match PayloadRange::new(lower, upper) {
        Ok(range) => state.handle(ControlEvent::PayloadRangeChanged(range)),
        Err(e) => log::warn!("ignoring payload slider position: {e}"),
    }
}

fn slider_marks(ui: &mut Ui) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 16.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let span = settings::PAYLOAD_SLIDER_MAX - settings::PAYLOAD_SLIDER_MIN;
    for (value, label) in settings::PAYLOAD_SLIDER_MARKS {
        let t = ((value - settings::PAYLOAD_SLIDER_MIN) / span) as f32;
        let x = rect.left() + t * rect.width();
        let anchor = if t <= 0.0 {
            egui::Align2::LEFT_CENTER
        } else if t >= 1.0 {
            egui::Align2::RIGHT_CENTER
        } else {
            egui::Align2::CENTER_CENTER
        };
        painter.text(
            egui::pos2(x, rect.center().y),
            anchor,
            label,
            egui::FontId::proportional(11.0),
            ui.visuals().weak_text_color(),
        );
    }
}

// ---------------------------------------------------------------------------
// Record table below the scatter chart
// ---------------------------------------------------------------------------

/// Collapsible table listing the launches plotted in the scatter chart.
pub fn record_table(ui: &mut Ui, figure: &ScatterFigure) {
    let header_text = format!("Selected launches  ({})", figure.point_count());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("selected_launches")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center))
                .column(Column::auto().at_least(120.0))
                .column(Column::auto().at_least(110.0))
                .column(Column::auto().at_least(50.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    for title in ["Launch Site", "Payload Mass (kg)", "class", "Booster Version Category"] {
                        header.col(|ui: &mut Ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, figure.rows.len(), |mut row| {
                        let rec = &figure.rows[row.index()];
                        row.col(|ui: &mut Ui| {
                            ui.label(&rec.launch_site);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.1}", rec.payload_mass_kg));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(rec.outcome.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&rec.booster_category);
                        });
                    });
                });
        });
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

        ui.label(format!(
            "{} launches from {}",
            state.dataset.len(),
            state.source.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} across sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                state.set_dataset(dataset, path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
