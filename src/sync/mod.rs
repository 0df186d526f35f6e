//! Bulk synchronization between the working document and the remote store
//!
//! Upload pushes every `users` record and then every `flashcards` record, one
//! request at a time. Clear lists and deletes every remote `flashcards` record
//! and then every `users` record, one request at a time.

pub mod clear;
pub mod error;
#[cfg(test)]
pub(crate) mod memory;
pub mod store;
pub mod upload;
pub mod worker;

use std::fmt;

pub use store::RestStore;
pub use upload::parse_for_upload;
pub use worker::{SyncEvent, SyncJob, SyncOutcome, SyncWorker};

use crate::core::document::Collection;

/// Progress of a running job, rendered into the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncProgress {
    /// Upload moved on to a collection
    UploadStarted(Collection),
    /// A create request for a record finished, successfully or not
    Uploaded {
        collection: Collection,
        attempted: usize,
        total: usize,
    },
    /// A remote record was deleted
    Deleted {
        collection: Collection,
        deleted: usize,
    },
}

impl fmt::Display for SyncProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncProgress::UploadStarted(collection) => {
                write!(f, "{} Uploading {}...", collection.icon(), collection.name())
            }
            SyncProgress::Uploaded {
                collection,
                attempted,
                total,
            } => write!(
                f,
                "{} Uploading {}... {}/{}",
                collection.icon(),
                collection.name(),
                attempted,
                total
            ),
            SyncProgress::Deleted {
                collection,
                deleted,
            } => write!(f, "🗑 Clearing {}... {} deleted", collection.name(), deleted),
        }
    }
}
