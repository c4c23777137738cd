//! Dashboard constants.

use eframe::egui::Color32;

/// File loaded when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);
pub const TITLE_SIZE: f32 = 40.0;

// Payload range slider, in kilograms.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;
pub const PAYLOAD_SLIDER_MARKS: [(f64, &str); 5] = [
    (0.0, "0 kg"),
    (2_500.0, "2500"),
    (5_000.0, "5000"),
    (7_500.0, "7500"),
    (10_000.0, "10000"),
];
