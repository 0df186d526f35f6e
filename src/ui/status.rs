//! Status line and remote endpoint list

use eframe::egui;

use crate::app::AdminApp;
use crate::core::document::Collection;

pub struct StatusPanel;

impl StatusPanel {
    pub fn show(ui: &mut egui::Ui, app: &AdminApp) {
        if !app.state.status.is_empty() {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.monospace(&app.state.status);
            });
        }
    }
}

/// Links to the collections on the configured store
pub struct EndpointsPanel;

impl EndpointsPanel {
    pub fn show(ui: &mut egui::Ui, app: &AdminApp) {
        ui.label(egui::RichText::new("🔗 Test Endpoints:").strong());
        for collection in Collection::UPLOAD_ORDER {
            let url = app.config.api.collection_url(collection);
            ui.horizontal(|ui| {
                ui.monospace(format!("GET {}", url));
                if ui.small_button("Open").clicked() {
                    if let Err(e) = open::that(&url) {
                        tracing::error!("Failed to open {}: {}", url, e);
                    }
                }
            });
        }
    }
}
