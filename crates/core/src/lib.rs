//! Spendcap Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for per-user category budgets.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod budgets;
pub mod categories;
pub mod errors;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
