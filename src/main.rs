use eframe::egui;
use tracing::info;

mod app;
mod config;
mod core;
mod logging;
mod state;
mod ui;

use app::AnnotatorApp;
use config::AppConfig;
use state::Settings;

const APP_TITLE: &str = "Music Image Annotator";

fn main() -> Result<(), eframe::Error> {
    match logging::setup_logging() {
        Some(path) => info!("Logging to {:?}", path),
        None => info!("Logging to stdout only"),
    }

    info!("Starting {}", APP_TITLE);

    let config = AppConfig::default();
    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([config.window_width / 2.0, config.window_height / 2.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    info!("Launching application window");
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(AnnotatorApp::new(config, settings)))
        }),
    )
}
