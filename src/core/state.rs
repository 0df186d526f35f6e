//! Panel state: the working document and what the operator sees about it

use super::document::{DocumentStats, FlashcardDocument};
use crate::sync::{parse_for_upload, SyncEvent, SyncJob, SyncOutcome};

/// Everything the panel shows, owned by the app and never persisted
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Working document text, freely editable
    pub document_text: String,
    /// Name of the last file picked
    pub file_name: Option<String>,
    /// Counts from the last successful load
    pub stats: Option<DocumentStats>,
    /// Human-readable status line
    pub status: String,
    /// A sync job is running
    pub busy: bool,
    /// The clear confirmation dialog is open
    pub clear_pending: bool,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_document(&self) -> bool {
        !self.document_text.is_empty()
    }

    pub fn can_upload(&self) -> bool {
        !self.busy && self.has_document()
    }

    pub fn can_clear(&self) -> bool {
        !self.busy
    }

    /// Replace the working document with the content of a file.
    ///
    /// On failure the previous document is discarded as well.
    pub fn load_file(&mut self, file_name: &str, bytes: &[u8]) -> bool {
        self.file_name = Some(file_name.to_string());
        self.status = "📂 Reading file...".to_string();

        let loaded = FlashcardDocument::from_bytes(bytes)
            .map_err(|e| e.to_string())
            .and_then(|doc| {
                let text = doc.to_pretty_string().map_err(|e| e.to_string())?;
                Ok((text, doc.stats()))
            });

        match loaded {
            Ok((text, stats)) => {
                tracing::info!(
                    "Loaded {}: {} users, {} flashcards",
                    file_name,
                    stats.users,
                    stats.flashcards
                );
                self.document_text = text;
                self.stats = Some(stats);
                self.status = format!("✅ File loaded: {}", file_name);
                true
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", file_name, e);
                self.document_text.clear();
                self.stats = None;
                self.status = "❌ Invalid JSON file!".to_string();
                false
            }
        }
    }

    /// Parse the working text and mark the panel busy.
    ///
    /// Returns `None` with an error status when there is nothing valid to send.
    pub fn prepare_upload(&mut self) -> Option<SyncJob> {
        if self.busy {
            return None;
        }

        match parse_for_upload(&self.document_text) {
            Ok(document) => {
                self.busy = true;
                self.status = "📚 Uploading users...".to_string();
                Some(SyncJob::Upload(document))
            }
            Err(e) => {
                tracing::error!("Upload refused: {}", e);
                self.status = SyncOutcome::UploadFailed(e).to_string();
                None
            }
        }
    }

    /// Ask for confirmation before clearing the remote store
    pub fn request_clear(&mut self) {
        if self.can_clear() {
            self.clear_pending = true;
        }
    }

    /// Answer the clear confirmation. Cancelling leaves the status untouched.
    pub fn resolve_clear(&mut self, confirmed: bool) -> Option<SyncJob> {
        if !std::mem::take(&mut self.clear_pending) || !confirmed || self.busy {
            return None;
        }

        self.busy = true;
        self.status = "🗑 Clearing data...".to_string();
        Some(SyncJob::Clear)
    }

    /// Fold an event from the worker into the status line
    pub fn apply_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Progress(progress) => self.status = progress.to_string(),
            SyncEvent::Finished(outcome) => {
                self.busy = false;
                self.status = outcome.to_string();
            }
        }
    }

    /// Mark a job as failed before it could start
    pub fn abort_job(&mut self, reason: &str) {
        self.busy = false;
        self.status = format!("❌ {}", reason);
    }

    /// Length of the working text in characters
    pub fn char_count(&self) -> usize {
        self.document_text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::document::Collection;
    use crate::sync::memory::{Call, MemoryStore};
    use crate::sync::worker::run_job;

    const DECK: &str = r#"{"users":[{"name":"ann"},{"name":"bo"}],"flashcards":[{"front":"hola","back":"hello"}]}"#;

    async fn run(state: &mut SyncState, store: &MemoryStore, job: SyncJob) {
        let mut events = Vec::new();
        run_job(store, job, |e| events.push(e)).await;
        for event in events {
            state.apply_event(event);
        }
    }

    #[test]
    fn test_load_valid_file() {
        let mut state = SyncState::new();

        assert!(state.load_file("deck.json", DECK.as_bytes()));

        assert_eq!(state.stats, Some(DocumentStats { users: 2, flashcards: 1 }));
        assert!(state.status.contains("deck.json"));
        assert!(state.document_text.starts_with("{\n  \"users\": ["));
        assert_eq!(state.char_count(), state.document_text.len());
    }

    #[test]
    fn test_load_file_with_bom() {
        let mut state = SyncState::new();

        assert!(state.load_file("bom.json", b"\xEF\xBB\xBF{\"users\":[{\"n\":1}],\"flashcards\":[]}"));

        assert_eq!(state.stats, Some(DocumentStats { users: 1, flashcards: 0 }));
        assert_eq!(state.status, "✅ File loaded: bom.json");
    }

    #[test]
    fn test_load_invalid_file_clears_document() {
        let mut state = SyncState::new();
        state.load_file("deck.json", DECK.as_bytes());

        assert!(!state.load_file("broken.json", b"{not json"));

        assert!(state.document_text.is_empty());
        assert_eq!(state.stats, None);
        assert_eq!(state.status, "❌ Invalid JSON file!");
        assert_eq!(state.file_name.as_deref(), Some("broken.json"));
    }

    #[test]
    fn test_load_export_load_is_stable() {
        let mut state = SyncState::new();
        state.load_file("deck.json", DECK.as_bytes());
        let first = state.document_text.clone();

        let mut again = SyncState::new();
        again.load_file("flashcard-data.json", first.as_bytes());

        assert_eq!(again.document_text, first);
    }

    #[test]
    fn test_upload_without_document_is_refused() {
        let mut state = SyncState::new();

        assert!(state.prepare_upload().is_none());
        assert!(!state.busy);
        assert_eq!(state.status, "❌ Please load a JSON file first!");
    }

    #[tokio::test]
    async fn test_edited_invalid_text_makes_no_calls() {
        let store = MemoryStore::new();
        let mut state = SyncState::new();
        state.load_file("deck.json", DECK.as_bytes());
        state.document_text.push_str("trailing garbage");

        let job = state.prepare_upload();

        assert!(job.is_none());
        assert!(state.status.starts_with("❌ Upload failed: "));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_round_trip_through_state() {
        let store = MemoryStore::new();
        let mut state = SyncState::new();
        state.load_file("deck.json", DECK.as_bytes());

        let job = state.prepare_upload().unwrap();
        assert!(state.busy);
        assert!(!state.can_upload());
        run(&mut state, &store, job).await;

        assert!(!state.busy);
        assert_eq!(state.status, "🎉 Upload completed! Users: 2, Flashcards: 1");
        assert_eq!(store.records(Collection::Users).len(), 2);
        assert_eq!(
            store.calls()[2],
            Call::Create(Collection::Flashcards, json!({"front": "hola", "back": "hello"}))
        );
    }

    #[tokio::test]
    async fn test_clear_confirmed() {
        let store = MemoryStore::new()
            .with_records(Collection::Flashcards, vec![json!({}), json!({})])
            .with_records(Collection::Users, vec![json!({})]);
        let mut state = SyncState::new();

        state.request_clear();
        assert!(state.clear_pending);
        let job = state.resolve_clear(true).unwrap();
        assert!(!state.clear_pending);
        run(&mut state, &store, job).await;

        assert_eq!(state.status, "✅ Cleared 1 users, 2 flashcards");
        let deletes = store
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Delete(..)))
            .count();
        assert_eq!(deletes, 3);
    }

    #[test]
    fn test_clear_cancelled_changes_nothing() {
        let mut state = SyncState::new();
        state.status = "✅ File loaded: deck.json".to_string();

        state.request_clear();
        let job = state.resolve_clear(false);

        assert!(job.is_none());
        assert!(!state.clear_pending);
        assert!(!state.busy);
        assert_eq!(state.status, "✅ File loaded: deck.json");
    }

    #[test]
    fn test_busy_blocks_new_jobs() {
        let mut state = SyncState::new();
        state.load_file("deck.json", DECK.as_bytes());
        state.prepare_upload().unwrap();

        assert!(state.prepare_upload().is_none());
        state.request_clear();
        assert!(!state.clear_pending);
        assert!(state.resolve_clear(true).is_none());
    }
}
