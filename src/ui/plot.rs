use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    self, Align2, Color32, FontId, Mesh, Pos2, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::callbacks::OutputId;
use crate::chart::{PieFigure, ScatterFigure};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Pie chart (success counts)
// ---------------------------------------------------------------------------

/// Render the success pie chart. egui_plot has no pie primitive, so wedges
/// are painted directly as triangle fans.
pub fn pie_chart(ui: &mut Ui, figure: &PieFigure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    let fractions = figure.fractions();
    if fractions.is_empty() {
        ui.add_sized(
            [ui.available_width(), CHART_HEIGHT],
            egui::Label::new("No launches match the selected site."),
        );
        return;
    }

    let (rect, response) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), CHART_HEIGHT),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);

    let radius = CHART_HEIGHT * 0.45;
    let center = Pos2::new(rect.center().x - radius * 0.5, rect.center().y);

    // Slices run clockwise from 12 o'clock.
    let mut start = -FRAC_PI_2;
    for (slice, &fraction) in figure.slices.iter().zip(&fractions) {
        let sweep = fraction as f32 * TAU;
        painter.add(Shape::mesh(wedge(center, radius, start, sweep, slice.color)));

        if fraction >= 0.03 {
            let mid = start + sweep / 2.0;
            painter.text(
                center + Vec2::angled(mid) * radius * 0.65,
                Align2::CENTER_CENTER,
                format!("{:.1}%", fraction * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }
    painter.circle_stroke(center, radius, Stroke::new(1.0, ui.visuals().window_stroke.color));

    // Legend to the right of the pie.
    let mut legend_pos = Pos2::new(center.x + radius + 24.0, center.y - radius * 0.8);
    for slice in &figure.slices {
        let swatch = egui::Rect::from_min_size(legend_pos, Vec2::splat(12.0));
        painter.rect_filled(swatch, 2.0, slice.color);
        painter.text(
            legend_pos + Vec2::new(18.0, 6.0),
            Align2::LEFT_CENTER,
            &slice.label,
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        legend_pos.y += 20.0;
    }

    // Tooltip for the hovered wedge.
    let hovered = response.hover_pos().and_then(|pos| {
        let offset = pos - center;
        if offset.length() > radius {
            return None;
        }
        // Angle measured clockwise from 12 o'clock, as a fraction of a turn.
        let turn = (offset.angle() + FRAC_PI_2).rem_euclid(TAU) / TAU;
        figure.slice_at(turn as f64)
    });
    if let Some(idx) = hovered {
        let slice = &figure.slices[idx];
        response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.label(format!("{}: {}", slice.label, slice.value));
        });
    }
}

/// Triangle fan covering `sweep` radians from `start`.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Mesh {
    let steps = ((sweep / TAU) * 128.0).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let angle = start + sweep * i as f32 / steps as f32;
        mesh.colored_vertex(center + Vec2::angled(angle) * radius, color);
    }
    for i in 1..=steps {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}

// ---------------------------------------------------------------------------
// Scatter chart (payload vs. outcome)
// ---------------------------------------------------------------------------

/// Render payload mass against outcome class, one series per booster
/// version category.
pub fn scatter_chart(ui: &mut Ui, figure: &ScatterFigure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    Plot::new(OutputId::PayloadScatterChart.id())
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(series.color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
