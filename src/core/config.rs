//! Application configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::document::Collection;

/// Base URL of the MockAPI project the panel was built against
pub const DEFAULT_API_BASE: &str = "https://695254133b3c518fca124652.mockapi.io/api/v1";

const MAX_RECENT_FILES: usize = 10;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote store settings
    pub api: ApiConfig,
    /// Directory file dialogs start in
    pub last_directory: Option<PathBuf>,
    /// Recently opened documents, most recent first
    pub recent_files: Vec<PathBuf>,
    /// UI settings
    pub ui: UiConfig,
}

/// Remote store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Editor font size in points
    pub font_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            last_directory: None,
            recent_files: Vec::new(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { font_size: 13.0 }
    }
}

impl ApiConfig {
    /// Base URL without trailing slashes
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// `{base}/{collection}`
    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base(), collection.name())
    }

    /// `{base}/{collection}/{id}` with `id` percent-encoded as one path segment
    pub fn record_url(&self, collection: Collection, id: &str) -> String {
        let collection_url = self.collection_url(collection);
        let Ok(mut url) = Url::parse(&collection_url) else {
            return format!("{}/{}", collection_url, id);
        };
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.push(id);
            }
            Err(()) => return format!("{}/{}", collection_url, id),
        }
        url.into()
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "flashcard-admin", "FlashcardAdmin")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Remember an opened document and its directory
    pub fn add_recent_file(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}
