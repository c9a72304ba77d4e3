mod app;
mod cloud;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::ExplorerApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    log::info!("Starting CORD-19 explorer on {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "CORD-19 Data Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(config)))),
    )
}
