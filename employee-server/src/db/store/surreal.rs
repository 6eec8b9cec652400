//! SurrealDB document store
//!
//! Every document lives in its own record `collection:key`, with a random
//! key generated on insert. Query results are read back as plain JSON with
//! the record id replaced by `meta::id(id)` (the bare key string).

use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::{RecordId, Surreal};

use super::{
    Document, DocumentRef, DocumentStore, DocumentStream, StoreError, StoreResult, StoredDocument,
    is_valid_identifier,
};

/// Projected name of the record key in query results
const KEY_FIELD: &str = "doc_key";

/// Embedded SurrealDB [`DocumentStore`]
#[derive(Clone, Debug)]
pub struct SurrealStore {
    db: Surreal<Db>,
}

/// Minimal view of an updated record, only used to detect that one existed
#[derive(Deserialize)]
struct Touched {
    #[allow(dead_code)]
    id: RecordId,
}

impl SurrealStore {
    /// Open (or create) a RocksDB-backed database at `path`
    pub async fn open(path: impl AsRef<Path>, namespace: &str, database: &str) -> StoreResult<Self> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path.as_ref())
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(
            path = %path.as_ref().display(),
            namespace,
            database,
            "SurrealDB store opened"
        );
        Ok(Self { db })
    }

    async fn select(
        &self,
        collection: &str,
        filter: &str,
        value: Option<Value>,
    ) -> StoreResult<Vec<StoredDocument>> {
        let sql = format!("SELECT *, meta::id(id) AS {KEY_FIELD} OMIT id FROM {collection}{filter}");
        let mut query = self.db.query(sql);
        if let Some(value) = value {
            query = query.bind(("value", value));
        }

        let mut response = query
            .await
            .map_err(map_db_error)?
            .check()
            .map_err(map_db_error)?;
        let rows: Vec<Value> = response.take(0).map_err(|e| StoreError::Decode(e.to_string()))?;

        rows.into_iter()
            .map(|row| into_stored(collection, row))
            .collect()
    }
}

fn check_identifier(name: &str) -> StoreResult<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(StoreError::Query(format!("Invalid identifier: {name}")))
    }
}

fn record_id(reference: &DocumentRef) -> RecordId {
    RecordId::from_table_key(reference.collection.as_str(), reference.key.clone())
}

fn map_db_error(err: surrealdb::Error) -> StoreError {
    let message = err.to_string();
    // Unique index violations read "Database index `..` already contains .."
    if message.contains("already contains") {
        StoreError::UniqueViolation(message)
    } else {
        StoreError::Query(message)
    }
}

fn into_stored(collection: &str, row: Value) -> StoreResult<StoredDocument> {
    let Value::Object(mut fields) = row else {
        return Err(StoreError::Decode(format!("Expected object, got {row}")));
    };
    let key = match fields.remove(KEY_FIELD) {
        Some(Value::String(key)) => key,
        other => {
            return Err(StoreError::Decode(format!(
                "Missing document key, got {other:?}"
            )));
        }
    };
    Ok(StoredDocument {
        reference: DocumentRef::new(collection, key),
        fields,
    })
}

#[async_trait]
impl DocumentStore for SurrealStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentRef> {
        check_identifier(collection)?;
        let reference = DocumentRef::new(collection, uuid::Uuid::new_v4().simple().to_string());

        self.db
            .query("CREATE $thing CONTENT $doc RETURN NONE")
            .bind(("thing", record_id(&reference)))
            .bind(("doc", Value::Object(document)))
            .await
            .map_err(map_db_error)?
            .check()
            .map_err(map_db_error)?;

        Ok(reference)
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>> {
        check_identifier(collection)?;
        check_identifier(field)?;

        let limit = limit.map(|n| format!(" LIMIT {n}")).unwrap_or_default();
        self.select(collection, &format!(" WHERE {field} = $value{limit}"), Some(value))
            .await
    }

    async fn scan_all(&self, collection: &str) -> StoreResult<DocumentStream> {
        check_identifier(collection)?;
        let documents = self.select(collection, "", None).await?;
        Ok(futures::stream::iter(documents.into_iter().map(Ok)).boxed())
    }

    async fn delete_document(&self, reference: &DocumentRef) -> StoreResult<()> {
        self.db
            .query("DELETE $thing")
            .bind(("thing", record_id(reference)))
            .await
            .map_err(map_db_error)?
            .check()
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn update_fields(&self, reference: &DocumentRef, fields: Document) -> StoreResult<bool> {
        let updated: Option<Touched> = self
            .db
            .update(record_id(reference))
            .merge(Value::Object(fields))
            .await
            .map_err(map_db_error)?;
        Ok(updated.is_some())
    }

    async fn ensure_unique(&self, collection: &str, field: &str) -> StoreResult<()> {
        check_identifier(collection)?;
        check_identifier(field)?;

        let sql = format!(
            "DEFINE INDEX IF NOT EXISTS {collection}_{field}_unique ON TABLE {collection} FIELDS {field} UNIQUE"
        );
        self.db
            .query(sql)
            .await
            .map_err(map_db_error)?
            .check()
            .map_err(map_db_error)?;

        tracing::info!(collection, field, "Unique index ensured");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db
            .health()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}
