//! Record-by-record upload of a document

use super::error::SyncError;
use super::store::RecordStore;
use super::SyncProgress;
use crate::core::document::{Collection, FlashcardDocument};

/// Result of one create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded,
    Failed(String),
}

/// Outcomes for one collection, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl CollectionReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Succeeded))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub users: CollectionReport,
    pub flashcards: CollectionReport,
}

impl UploadReport {
    fn get_mut(&mut self, collection: Collection) -> &mut CollectionReport {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Flashcards => &mut self.flashcards,
        }
    }

    pub fn failed(&self) -> usize {
        self.users.failed() + self.flashcards.failed()
    }
}

/// Parse the working text into a document, refusing to start without one
pub fn parse_for_upload(text: &str) -> Result<FlashcardDocument, SyncError> {
    if text.is_empty() {
        return Err(SyncError::NoDocument);
    }
    Ok(FlashcardDocument::parse(text)?)
}

/// Create every record of the document on the store.
///
/// A failed record is logged and recorded; the remaining records are still
/// sent. Collections that are missing or empty are skipped.
pub async fn upload_document<S, F>(
    store: &S,
    document: &FlashcardDocument,
    mut on_progress: F,
) -> UploadReport
where
    S: RecordStore + ?Sized,
    F: FnMut(SyncProgress),
{
    let mut report = UploadReport::default();

    for collection in Collection::UPLOAD_ORDER {
        on_progress(SyncProgress::UploadStarted(collection));

        let records = document.records(collection);
        let total = records.len();

        for (index, record) in records.iter().enumerate() {
            let outcome = match store.create(collection, record).await {
                Ok(_) => ItemOutcome::Succeeded,
                Err(e) => {
                    tracing::warn!(
                        "Failed to upload {} record {}/{}: {}",
                        collection.name(),
                        index + 1,
                        total,
                        e
                    );
                    ItemOutcome::Failed(e.to_string())
                }
            };
            report.get_mut(collection).outcomes.push(outcome);

            on_progress(SyncProgress::Uploaded {
                collection,
                attempted: index + 1,
                total,
            });
        }
    }

    tracing::info!(
        "Upload finished: {} users, {} flashcards, {} failed",
        report.users.succeeded(),
        report.flashcards.succeeded(),
        report.failed()
    );
    report
}
