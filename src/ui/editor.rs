//! JSON preview and editor panel

use eframe::egui;

use crate::app::AdminApp;

/// Editable view of the working document
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut AdminApp) {
        ui.horizontal(|ui| {
            ui.heading("📝 JSON Preview");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let count = if app.state.has_document() {
                    format!("{} characters", app.state.char_count())
                } else {
                    "No data loaded".to_string()
                };
                ui.label(count);
            });
        });
        ui.separator();

        let font = egui::FontId::monospace(app.config.ui.font_size);
        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut app.state.document_text)
                    .code_editor()
                    .font(font)
                    .hint_text("Load a JSON file or paste JSON here...")
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .show(ui);
            });
    }
}
