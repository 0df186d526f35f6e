//! Remote store settings window

use eframe::egui;

use crate::app::AdminApp;

pub struct SettingsWindow;

impl SettingsWindow {
    pub fn show(ctx: &egui::Context, app: &mut AdminApp) {
        if !app.settings_open {
            return;
        }

        let mut open = true;
        let mut apply = false;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                    ui.label("API base URL");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.settings_draft.api.base_url)
                            .desired_width(360.0),
                    );
                    ui.end_row();

                    ui.label("Timeout (s)");
                    ui.add(egui::DragValue::new(&mut app.settings_draft.api.timeout_secs).range(1..=600));
                    ui.end_row();

                    ui.label("Editor font size");
                    ui.add(egui::Slider::new(&mut app.settings_draft.ui.font_size, 8.0..=28.0));
                    ui.end_row();
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        apply = true;
                    }
                    if ui.button("Reset to defaults").clicked() {
                        app.settings_draft.api = Default::default();
                        app.settings_draft.ui = Default::default();
                    }
                });
            });

        if apply {
            app.apply_settings();
        } else if !open {
            app.settings_open = false;
        }
    }
}
