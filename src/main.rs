mod app;
mod callbacks;
mod chart;
mod color;
mod data;
mod settings;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Interactive dashboard over SpaceX launch records.
#[derive(Parser, Debug)]
#[command(name = "spacex-launch-dash")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(value_name = "FILE", default_value = settings::DEFAULT_DATA_FILE)]
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = data::loader::load_file(&args.file)
        .with_context(|| format!("Failed to load launch records: {}", args.file.display()))?;
    log::info!(
        "Loaded {} launches from {} ({} sites)",
        dataset.len(),
        args.file.display(),
        dataset.sites().len()
    );
    let state = AppState::new(dataset, args.file);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        settings::DASHBOARD_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
