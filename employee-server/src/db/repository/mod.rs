//! Repository Module
//!
//! Typed access to the document store. Repositories own the collection
//! layout and translate store failures into [`RepoError`].

pub mod employee;

pub use employee::EmployeeRepository;

use thiserror::Error;

use crate::db::store::StoreError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(msg) => RepoError::Duplicate(msg),
            StoreError::Decode(msg) => RepoError::Decode(msg),
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
