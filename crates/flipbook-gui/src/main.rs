#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::egui;
use flipbook_core::{DocumentInput, FlipbookOptions};
use flipbook_runtime::logger::AppLogger;

mod app;
mod keys;
mod views;

#[derive(Parser)]
#[command(name = "flipbook-gui", about = "3D flipbook PDF viewer", version)]
struct Args {
    /// PDF file or http(s) URL to open at startup
    input: Option<String>,

    /// Viewer options as JSON
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let logger = AppLogger::new(500);
    if let Err(e) = logger.clone().init() {
        eprintln!("Failed to install logger: {}", e);
    }

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let options = match &args.config {
        Some(path) => runtime
            .block_on(FlipbookOptions::load(path))
            .unwrap_or_else(|e| {
                log::error!("Ignoring config {}: {}", path.display(), e);
                FlipbookOptions::default()
            }),
        None => FlipbookOptions::default(),
    };
    let initial = args
        .input
        .as_deref()
        .map(DocumentInput::parse)
        .or_else(|| options.source.clone());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_title("Flipbook"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Flipbook",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::FlipbookApp::new(
                cc, handle, logger, options, initial,
            )))
        }),
    )
}
