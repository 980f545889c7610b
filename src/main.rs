mod app;
mod color;
mod config;
mod data;
mod geo;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::SalaryDashboardApp;
use config::DashboardConfig;
use data::loader::{self, DataSource};
use eframe::egui;
use state::Session;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load().context("loading dashboard settings")?;
    log::debug!("Resolved settings: {config:?}");

    let source = DataSource::parse(&config.source);
    let dataset = loader::load_source(&source)
        .with_context(|| format!("loading dataset from {source}"))?;
    log::info!("Loaded {} records from {source}", dataset.len());
    if dataset.is_empty() {
        log::warn!("Dataset at {source} has no records");
    }

    let session = Session::new(dataset, config, source.to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Salary Dashboard")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
