//! Flashcard Admin - load flashcard JSON and sync it to a REST store
//!
//! Loads a `users` + `flashcards` document, lets the operator edit it, uploads
//! every record, clears the remote collections and exports the edited JSON.

mod app;
mod core;
mod sync;
mod ui;

use app::AdminApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Flashcard Admin...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Flashcard Admin Panel"),
        ..Default::default()
    };

    eframe::run_native(
        "Flashcard Admin",
        native_options,
        Box::new(|cc| Ok(Box::new(AdminApp::new(cc)))),
    )
}
