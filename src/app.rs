//! Main application state and UI coordination

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::document::{self, DEFAULT_EXPORT_NAME};
use crate::core::state::SyncState;
use crate::sync::{RestStore, SyncJob, SyncWorker};
use crate::ui::actions::{ActionsPanel, ClearConfirmDialog};
use crate::ui::editor::EditorPanel;
use crate::ui::loader::LoaderPanel;
use crate::ui::settings::SettingsWindow;
use crate::ui::status::{EndpointsPanel, StatusPanel};

/// Main application state
pub struct AdminApp {
    /// Working document, stats and status line
    pub state: SyncState,
    /// Application configuration
    pub config: AppConfig,
    /// Whether the settings window is open
    pub settings_open: bool,
    /// Settings being edited, applied on save
    pub settings_draft: AppConfig,
    /// Background sync runner, absent if the runtime could not start
    worker: Option<SyncWorker>,
}

impl AdminApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });

        let worker = match SyncWorker::new() {
            Ok(worker) => Some(worker),
            Err(e) => {
                tracing::error!("Sync worker unavailable: {:#}", e);
                None
            }
        };

        Self {
            state: SyncState::new(),
            settings_draft: config.clone(),
            config,
            settings_open: false,
            worker,
        }
    }

    /// Pick a document with the system file dialog
    pub fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("JSON", &["json"]);
        if let Some(dir) = &self.config.last_directory {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.open_file(path);
        }
    }

    /// Load a document from disk into the working state
    pub fn open_file(&mut self, path: PathBuf) {
        let name = document::file_name(&path);
        let bytes = match document::read_file(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("{:#}", e);
                self.state.file_name = Some(name);
                self.state.status = format!("❌ {}", e);
                return;
            }
        };

        if self.state.load_file(&name, &bytes) {
            self.config.add_recent_file(path);
            self.save_config();
        }
    }

    /// Write the working text to a file chosen by the operator
    pub fn export_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(DEFAULT_EXPORT_NAME);
        if let Some(dir) = &self.config.last_directory {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        match document::export(&path, &self.state.document_text) {
            Ok(()) => {
                self.state.status = format!("💾 Saved {}", document::file_name(&path));
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                self.state.status = format!("❌ {}", e);
            }
        }
    }

    /// Start uploading the working document
    pub fn start_upload(&mut self, ctx: &egui::Context) {
        if let Some(job) = self.state.prepare_upload() {
            self.dispatch(job, ctx);
        }
    }

    /// Answer the clear confirmation, starting the clear when confirmed
    pub fn resolve_clear(&mut self, confirmed: bool, ctx: &egui::Context) {
        if let Some(job) = self.state.resolve_clear(confirmed) {
            self.dispatch(job, ctx);
        }
    }

    /// Hand a job to the worker
    fn dispatch(&mut self, job: SyncJob, ctx: &egui::Context) {
        let Some(worker) = &self.worker else {
            self.state.abort_job("Sync worker is not running");
            return;
        };

        let store = match RestStore::new(&self.config.api) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("{}", e);
                self.state.abort_job(&e.to_string());
                return;
            }
        };

        tracing::info!("Syncing with {}", store.base_url());
        let ctx = ctx.clone();
        worker.spawn(Arc::new(store), job, move || ctx.request_repaint());
    }

    /// Apply progress from a running job
    fn poll_worker(&mut self) {
        if let Some(worker) = &self.worker {
            for event in worker.poll_events() {
                self.state.apply_event(event);
            }
        }
    }

    /// Open the settings window with the current configuration
    pub fn open_settings(&mut self) {
        self.settings_draft = self.config.clone();
        self.settings_open = true;
    }

    /// Store edited settings
    pub fn apply_settings(&mut self) {
        self.config.api = self.settings_draft.api.clone();
        self.config.ui = self.settings_draft.ui.clone();
        self.settings_open = false;
        tracing::info!("Remote store set to {}", self.config.api.base());
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {:#}", e);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open JSON...").clicked() {
                        self.open_file_dialog();
                        ui.close();
                    }
                    if ui
                        .add_enabled(self.state.has_document(), egui::Button::new("Export JSON..."))
                        .clicked()
                    {
                        self.export_dialog();
                        ui.close();
                    }

                    let recent = self.config.recent_files.clone();
                    if !recent.is_empty() {
                        ui.separator();
                        ui.menu_button("Open Recent", |ui| {
                            for path in recent {
                                if ui.button(path.display().to_string()).clicked() {
                                    self.open_file(path);
                                    ui.close();
                                }
                            }
                        });
                    }

                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Remote", |ui| {
                    if ui
                        .add_enabled(self.state.can_upload(), egui::Button::new("Upload"))
                        .clicked()
                    {
                        self.start_upload(ctx);
                        ui.close();
                    }
                    if ui
                        .add_enabled(self.state.can_clear(), egui::Button::new("Clear..."))
                        .clicked()
                    {
                        self.state.request_clear();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Settings...").clicked() {
                        self.open_settings();
                        ui.close();
                    }
                });
            });
        });
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        // Handle keyboard shortcuts
        let (open, export) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::O),
                i.modifiers.ctrl && i.key_pressed(egui::Key::S),
            )
        });
        if open {
            self.open_file_dialog();
        }
        if export && self.state.has_document() {
            self.export_dialog();
        }

        self.render_menu_bar(ctx);

        egui::SidePanel::left("sync_panel")
            .resizable(true)
            .default_width(380.0)
            .min_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    LoaderPanel::show(ui, self);
                    ui.separator();
                    ActionsPanel::show(ui, self);
                    ui.add_space(8.0);
                    StatusPanel::show(ui, self);
                    ui.separator();
                    EndpointsPanel::show(ui, self);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });

        ClearConfirmDialog::show(ctx, self);
        SettingsWindow::show(ctx, self);
    }
}
