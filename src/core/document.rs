//! Flashcard JSON documents: parsing, summary counts and export

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

/// File name suggested when exporting the working document
pub const DEFAULT_EXPORT_NAME: &str = "flashcard-data.json";

/// A named collection carried by the document and exposed by the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Flashcards,
}

impl Collection {
    /// Order in which records are uploaded
    pub const UPLOAD_ORDER: [Collection; 2] = [Collection::Users, Collection::Flashcards];
    /// Order in which remote records are deleted
    pub const CLEAR_ORDER: [Collection; 2] = [Collection::Flashcards, Collection::Users];

    /// Field name in the document and path segment on the remote store
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Flashcards => "flashcards",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Flashcards => "Flashcards",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Collection::Users => "📚",
            Collection::Flashcards => "🎴",
        }
    }
}

/// Why raw file content could not become a document
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record counts shown after a file is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub users: usize,
    pub flashcards: usize,
}

impl DocumentStats {
    pub fn get(&self, collection: Collection) -> usize {
        match collection {
            Collection::Users => self.users,
            Collection::Flashcards => self.flashcards,
        }
    }
}

/// A parsed document.
///
/// Any JSON value is accepted. Only the `users` and `flashcards` arrays of a
/// top-level object are ever read; everything else is carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardDocument {
    root: Value,
}

impl FlashcardDocument {
    /// Parse document text
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let root = serde_json::from_str(text)?;
        Ok(Self { root })
    }

    /// Decode raw file content as UTF-8 and parse it; a leading BOM is skipped
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Ok(Self::parse(text)?)
    }

    /// Records of a collection, empty when the field is absent or not an array
    pub fn records(&self, collection: Collection) -> &[Value] {
        self.root
            .get(collection.name())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            users: self.records(Collection::Users).len(),
            flashcards: self.records(Collection::Flashcards).len(),
        }
    }

    /// Render with two-space indentation
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }
}

/// Read a document file from disk
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write the working document text verbatim
pub fn export(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)
        .with_context(|| format!("Failed to export file: {}", path.display()))?;
    tracing::info!("Exported document to: {}", path.display());
    Ok(())
}

/// Display name for a path, falling back to the whole path
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
