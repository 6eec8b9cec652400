//! In-memory document store
//!
//! Keeps documents per collection in insertion order behind a
//! `parking_lot::RwLock`. Unique-field checks run under the write lock, so
//! they are atomic with the insert they guard.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::RwLock;
use serde_json::Value;

use super::{
    Document, DocumentRef, DocumentStore, DocumentStream, StoreError, StoreResult, StoredDocument,
};

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<(String, Document)>,
    unique_fields: HashSet<String>,
}

impl Collection {
    /// First unique field whose value in `fields` is already held by another document
    fn unique_conflict(&self, fields: &Document, skip_key: Option<&str>) -> Option<String> {
        self.unique_fields.iter().find_map(|field| {
            let value = fields.get(field)?;
            self.documents
                .iter()
                .filter(|(key, _)| Some(key.as_str()) != skip_key)
                .any(|(_, doc)| doc.get(field) == Some(value))
                .then(|| format!("{field} = {value}"))
        })
    }
}

/// In-memory [`DocumentStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    fail_all: AtomicBool,
    operations: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a connection error.
    pub fn set_simulate_failure(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of store operations attempted so far
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of documents currently held in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.documents.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn begin(&self) -> StoreResult<()> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("simulated store failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentRef> {
        self.begin()?;
        let mut collections = self.collections.write();
        let coll = collections.entry(collection.to_string()).or_default();

        if let Some(conflict) = coll.unique_conflict(&document, None) {
            return Err(StoreError::UniqueViolation(conflict));
        }

        let key = uuid::Uuid::new_v4().simple().to_string();
        coll.documents.push((key.clone(), document));
        Ok(DocumentRef::new(collection, key))
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>> {
        self.begin()?;
        let collections = self.collections.read();
        let Some(coll) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(coll
            .documents
            .iter()
            .filter(|(_, doc)| doc.get(field) == Some(&value))
            .take(limit.unwrap_or(usize::MAX))
            .map(|(key, doc)| StoredDocument {
                reference: DocumentRef::new(collection, key.clone()),
                fields: doc.clone(),
            })
            .collect())
    }

    async fn scan_all(&self, collection: &str) -> StoreResult<DocumentStream> {
        self.begin()?;
        let snapshot: Vec<StoredDocument> = self
            .collections
            .read()
            .get(collection)
            .map(|coll| {
                coll.documents
                    .iter()
                    .map(|(key, doc)| StoredDocument {
                        reference: DocumentRef::new(collection, key.clone()),
                        fields: doc.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(futures::stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }

    async fn delete_document(&self, reference: &DocumentRef) -> StoreResult<()> {
        self.begin()?;
        if let Some(coll) = self.collections.write().get_mut(&reference.collection) {
            coll.documents.retain(|(key, _)| key != &reference.key);
        }
        Ok(())
    }

    async fn update_fields(&self, reference: &DocumentRef, fields: Document) -> StoreResult<bool> {
        self.begin()?;
        let mut collections = self.collections.write();
        let Some(coll) = collections.get_mut(&reference.collection) else {
            return Ok(false);
        };

        if let Some(conflict) = coll.unique_conflict(&fields, Some(&reference.key)) {
            return Err(StoreError::UniqueViolation(conflict));
        }

        match coll.documents.iter_mut().find(|(key, _)| key == &reference.key) {
            Some((_, doc)) => {
                doc.extend(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ensure_unique(&self, collection: &str, field: &str) -> StoreResult<()> {
        self.begin()?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .unique_fields
            .insert(field.to_string());
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.begin()
    }
}
