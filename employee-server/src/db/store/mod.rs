//! Document store abstraction
//!
//! The repository layer only needs a handful of schema-less operations:
//! insert, equality query, full scan, delete and field update. Two
//! backends implement them:
//!
//! - [`SurrealStore`] - embedded SurrealDB (RocksDB engine)
//! - [`MemoryStore`] - in-process maps, used by tests and `STORE_BACKEND=memory`

mod memory;
mod surreal;

pub use memory::MemoryStore;
pub use surreal::SurrealStore;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::{Map, Value};
use thiserror::Error;

/// Document body: field name -> JSON value
pub type Document = Map<String, Value>;

/// Store-assigned document address
///
/// Opaque to callers. It is the only way to address a document for
/// delete/update and has nothing to do with any business key stored inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    pub collection: String,
    pub key: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.collection, self.key)
    }
}

/// A document together with its address
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub reference: DocumentRef,
    pub fields: Document,
}

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store query error: {0}")]
    Query(String),

    #[error("Store decode error: {0}")]
    Decode(String),

    /// A unique index rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Lazy sequence of documents produced by [`DocumentStore::scan_all`]
pub type DocumentStream = BoxStream<'static, StoreResult<StoredDocument>>;

/// Schema-less document store
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Insert a new document and return its store-assigned address
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentRef>;

    /// Documents whose `field` equals `value`, at most `limit` of them
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Every document of the collection, in store enumeration order
    async fn scan_all(&self, collection: &str) -> StoreResult<DocumentStream>;

    /// Remove a document. Removing a missing document is not an error.
    async fn delete_document(&self, reference: &DocumentRef) -> StoreResult<()>;

    /// Overwrite the given fields of a document, leaving others untouched.
    /// Returns false when the document no longer exists.
    async fn update_fields(&self, reference: &DocumentRef, fields: Document) -> StoreResult<bool>;

    /// Ask the store to reject a second document with the same `field` value
    async fn ensure_unique(&self, collection: &str, field: &str) -> StoreResult<()>;

    /// Cheap round-trip used by the health check
    async fn ping(&self) -> StoreResult<()>;
}

/// Collection and field names are interpolated into store statements
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
