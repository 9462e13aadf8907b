//! Umrah Companion - duas, audio and travel notes for each stage of Umrah
//!
//! A single-user desktop app that keeps its content in one JSON document.

mod app;
mod core;
mod ui;

use app::UmrahApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Umrah Companion...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Umrah Companion App"),
        ..Default::default()
    };

    eframe::run_native(
        "Umrah Companion",
        native_options,
        Box::new(|cc| Ok(Box::new(UmrahApp::new(cc)))),
    )
}
