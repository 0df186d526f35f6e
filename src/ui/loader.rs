//! Step 1: picking a file and showing what it holds

use eframe::egui;

use crate::app::AdminApp;
use crate::core::document::Collection;

pub struct LoaderPanel;

impl LoaderPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut AdminApp) {
        ui.heading("📂 Step 1: Load JSON File");
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            if ui.button("Choose JSON File").clicked() {
                app.open_file_dialog();
            }

            if let Some(name) = &app.state.file_name {
                ui.add_space(4.0);
                ui.label(format!("📄 {}", name));
            }
        });

        if let Some(stats) = app.state.stats {
            ui.add_space(8.0);
            ui.columns(2, |columns| {
                for (ui, collection) in columns.iter_mut().zip(Collection::UPLOAD_ORDER) {
                    ui.group(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading(stats.get(collection).to_string());
                            ui.label(collection.label());
                        });
                    });
                }
            });
        }
    }
}
