//! SQLite storage implementation for Spendcap.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `spendcap-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for users, categories and budgets
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `spendcap-core` is database-agnostic and works with traits.
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from spendcap-core for convenience
pub use spendcap_core::errors::{DatabaseError, Error, Result};
