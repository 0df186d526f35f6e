//! Deleting every remote record

use serde_json::Value;

use super::error::SyncError;
use super::store::RecordStore;
use super::SyncProgress;
use crate::core::document::Collection;

/// Number of records deleted per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub users: usize,
    pub flashcards: usize,
}

impl ClearReport {
    fn bump(&mut self, collection: Collection) -> usize {
        let count = match collection {
            Collection::Users => &mut self.users,
            Collection::Flashcards => &mut self.flashcards,
        };
        *count += 1;
        *count
    }
}

/// The identifier the store assigned to a record
pub fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Delete every remote flashcard, then every remote user.
///
/// The first error ends the run. Records already deleted stay deleted.
pub async fn clear_remote<S, F>(store: &S, mut on_progress: F) -> Result<ClearReport, SyncError>
where
    S: RecordStore + ?Sized,
    F: FnMut(SyncProgress),
{
    let mut report = ClearReport::default();

    for collection in Collection::CLEAR_ORDER {
        let records = store.list(collection).await?;
        tracing::info!("Clearing {} remote {}", records.len(), collection.name());

        for record in &records {
            let id = record_id(record).ok_or(SyncError::MissingId(collection))?;
            store.delete(collection, &id).await?;

            let deleted = report.bump(collection);
            on_progress(SyncProgress::Deleted {
                collection,
                deleted,
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sync::memory::{Call, MemoryStore};

    fn seeded() -> MemoryStore {
        MemoryStore::new()
            .with_records(Collection::Users, vec![json!({"name": "ann"}), json!({"name": "bo"})])
            .with_records(
                Collection::Flashcards,
                vec![json!({"front": "a"}), json!({"front": "b"}), json!({"front": "c"})],
            )
    }

    #[tokio::test]
    async fn test_clears_flashcards_then_users() {
        let store = seeded();

        let report = clear_remote(&store, |_| {}).await.unwrap();

        assert_eq!(report, ClearReport { users: 2, flashcards: 3 });
        assert_eq!(
            store.calls(),
            vec![
                Call::List(Collection::Flashcards),
                Call::Delete(Collection::Flashcards, "3".to_string()),
                Call::Delete(Collection::Flashcards, "4".to_string()),
                Call::Delete(Collection::Flashcards, "5".to_string()),
                Call::List(Collection::Users),
                Call::Delete(Collection::Users, "1".to_string()),
                Call::Delete(Collection::Users, "2".to_string()),
            ]
        );
        assert!(store.records(Collection::Users).is_empty());
        assert!(store.records(Collection::Flashcards).is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_only_lists() {
        let store = MemoryStore::new();

        let report = clear_remote(&store, |_| {}).await.unwrap();

        assert_eq!(report, ClearReport::default());
        assert_eq!(
            store.calls(),
            vec![Call::List(Collection::Flashcards), Call::List(Collection::Users)]
        );
    }

    #[tokio::test]
    async fn test_error_aborts_remaining_deletes() {
        let store = seeded().fail_delete_at(1);

        let err = clear_remote(&store, |_| {}).await.unwrap_err();

        assert!(err.to_string().contains("HTTP 503"));
        // One flashcard gone, the failed one and everything after untouched.
        assert_eq!(store.records(Collection::Flashcards).len(), 2);
        assert_eq!(store.records(Collection::Users).len(), 2);
        assert!(!store.calls().contains(&Call::List(Collection::Users)));
    }

    #[tokio::test]
    async fn test_record_without_id_aborts() {
        let store = MemoryStore::new().with_records(Collection::Flashcards, vec![json!([1, 2])]);

        let err = clear_remote(&store, |_| {}).await.unwrap_err();

        assert!(matches!(err, SyncError::MissingId(Collection::Flashcards)));
        assert_eq!(store.calls(), vec![Call::List(Collection::Flashcards)]);
    }

    #[test]
    fn test_record_id_accepts_strings_and_numbers() {
        assert_eq!(record_id(&json!({"id": "12"})), Some("12".to_string()));
        assert_eq!(record_id(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(record_id(&json!({"id": null})), None);
        assert_eq!(record_id(&json!({})), None);
    }
}
