#![warn(clippy::all, rust_2018_idioms)]

use log::warn;
use minipaint::{MiniPaintApp, ViewConfig};

/// Environment variable naming an optional JSON view configuration
const CONFIG_ENV: &str = "MINIPAINT_CONFIG";

fn load_config() -> ViewConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return ViewConfig::default();
    };
    ViewConfig::load(&path).unwrap_or_else(|err| {
        warn!("Falling back to the default configuration: {err}");
        ViewConfig::default()
    })
}

fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 700.0])
            .with_min_inner_size([120.0, 120.0])
            .with_title("MiniPaint"),
        ..Default::default()
    };
    eframe::run_native(
        "MiniPaint",
        native_options,
        Box::new(|cc| Ok(Box::new(MiniPaintApp::new(cc, config)))),
    )
}
