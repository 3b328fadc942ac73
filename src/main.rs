//! Swipe-feed media viewer.
//! Built with Rust + egui (eframe).

mod app;
mod config;
mod gesture;
mod loader;
mod media;
mod navigation;
mod presenter;
mod source;

use eframe::egui;
use tracing::info;

use app::ViewerApp;
use config::Config;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    info!(
        "Starting viewer: endpoint={} environment={}",
        config.api_endpoint,
        config.environment.as_str()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to start async runtime");
    let rt = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 854.0])
            .with_min_inner_size([240.0, 426.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Swipe Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, config, rt)))),
    )
}
