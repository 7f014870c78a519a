mod app;
mod hud;
mod input;

use eframe::egui;
use tracing::info;

use app::DeepGlideApp;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting DeepGlide");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DeepGlide")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DeepGlide",
        options,
        Box::new(|_cc| Ok(Box::new(DeepGlideApp::new()))),
    )
}
