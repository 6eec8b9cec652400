//! Data models
//!
//! Wire types shared between the server and its API clients.

pub mod employee;
pub mod role;
pub mod salary;

// Re-exports
pub use employee::*;
pub use role::*;
pub use salary::*;
