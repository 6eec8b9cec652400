//! Shared types for the employee directory
//!
//! Pure domain code used by the server crate: the [`Employee`] record,
//! field validators and the search matcher. Nothing here performs I/O.

pub mod models;
pub mod search;
pub mod validation;

// Re-exports
pub use models::{Employee, Role, Salary};
pub use search::SearchCriteria;
pub use validation::{EmailPattern, ValidationError};
pub use serde::{Deserialize, Serialize};
