//! Database Module
//!
//! - [`store`] - schema-less document store backends
//! - [`models`] - stored document shapes
//! - [`repository`] - typed access for handlers

pub mod models;
pub mod repository;
pub mod store;

use std::sync::Arc;

use crate::core::{Config, config::StoreBackend};
use store::{DocumentStore, MemoryStore, StoreResult, SurrealStore};

/// Open the document store selected by `STORE_BACKEND`
pub async fn open_store(config: &Config) -> StoreResult<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Surreal => {
            let dir = config.database_dir();
            if let Err(e) = std::fs::create_dir_all(&dir) {
                return Err(store::StoreError::Connection(format!(
                    "Failed to create {}: {e}",
                    dir.display()
                )));
            }
            let store = SurrealStore::open(&dir, &config.db_namespace, &config.db_name).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
