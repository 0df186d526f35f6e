//! Step 2: upload, export and clear

use eframe::egui;

use crate::app::AdminApp;

pub struct ActionsPanel;

impl ActionsPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut AdminApp) {
        ui.heading("⚡ Step 2: Sync with the remote store");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let upload = ui.add_enabled(app.state.can_upload(), egui::Button::new("⬆ Upload"));
            if upload.clicked() {
                app.start_upload(ui.ctx());
            }

            let export = ui.add_enabled(app.state.has_document(), egui::Button::new("⬇ Download JSON"));
            if export.clicked() {
                app.export_dialog();
            }

            let clear = ui.add_enabled(app.state.can_clear(), egui::Button::new("🗑 Clear remote"));
            if clear.clicked() {
                app.state.request_clear();
            }

            if app.state.busy {
                ui.spinner();
            }
        });
    }
}

/// Confirmation gate in front of the destructive clear
pub struct ClearConfirmDialog;

impl ClearConfirmDialog {
    pub fn show(ctx: &egui::Context, app: &mut AdminApp) {
        if !app.state.clear_pending {
            return;
        }

        let mut answer = None;
        egui::Window::new("Clear remote data")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("⚠ This will DELETE ALL data on the remote store! Are you sure?");
                ui.label(format!("Target: {}", app.config.api.base()));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete everything").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            answer = Some(false);
        }

        if let Some(confirmed) = answer {
            app.resolve_clear(confirmed, ctx);
        }
    }
}
