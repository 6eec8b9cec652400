//! Stored document shapes

pub mod employee;

pub use employee::EmployeeDocument;
