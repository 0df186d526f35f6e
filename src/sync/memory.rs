//! In-memory `RecordStore` that records every call, for exercising sync logic

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::clear::record_id;
use super::error::StoreError;
use super::store::RecordStore;
use crate::core::document::Collection;

/// One request as the store saw it
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(Collection, Value),
    List(Collection),
    Delete(Collection, String),
}

type CreatePredicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Default)]
struct Inner {
    records: HashMap<Collection, Vec<Value>>,
    calls: Vec<Call>,
    next_id: u64,
    deletes: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    reject_create: Option<CreatePredicate>,
    fail_delete_at: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection; records without an `id` get one assigned
    pub fn with_records(self, collection: Collection, records: Vec<Value>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            for mut record in records {
                if record.get("id").is_none() {
                    inner.next_id += 1;
                    assign_id(&mut record, inner.next_id);
                }
                inner.records.entry(collection).or_default().push(record);
            }
        }
        self
    }

    /// Fail creates whose body matches
    pub fn reject_create(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.reject_create = Some(Box::new(predicate));
        self
    }

    /// Fail the delete call with this zero-based index
    pub fn fail_delete_at(mut self, index: usize) -> Self {
        self.fail_delete_at = Some(index);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn records(&self, collection: Collection) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .records
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}

fn assign_id(record: &mut Value, id: u64) {
    if let Some(fields) = record.as_object_mut() {
        fields.insert("id".to_string(), json!(id.to_string()));
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, collection: Collection, record: &Value) -> Result<Value, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(collection, record.clone()));

        if self.reject_create.as_ref().is_some_and(|reject| reject(record)) {
            return Err(StoreError::Status {
                method: "POST",
                url: format!("memory://{}", collection.name()),
                status: 500,
            });
        }

        inner.next_id += 1;
        let mut stored = record.clone();
        assign_id(&mut stored, inner.next_id);
        inner.records.entry(collection).or_default().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List(collection));
        Ok(inner.records.get(&collection).cloned().unwrap_or_default())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(collection, id.to_string()));

        let index = inner.deletes;
        inner.deletes += 1;
        if self.fail_delete_at == Some(index) {
            return Err(StoreError::Status {
                method: "DELETE",
                url: format!("memory://{}/{}", collection.name(), id),
                status: 503,
            });
        }

        let records = inner.records.entry(collection).or_default();
        let before = records.len();
        records.retain(|r| record_id(r).as_deref() != Some(id));
        if records.len() == before {
            return Err(StoreError::Status {
                method: "DELETE",
                url: format!("memory://{}/{}", collection.name(), id),
                status: 404,
            });
        }
        Ok(())
    }
}
