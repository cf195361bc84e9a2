//! Store abstraction and concrete stores.
//!
//! This module provides the data access layer for the search pipeline:
//! - `DatabaseBackend`, the uniform "execute a compiled query" interface
//! - `Value` cells and the `DatabaseValue` extraction helpers
//! - SQLite (pooled, file or memory) and PostgreSQL stores
//! - `DatabaseConfig` for choosing a store at runtime
//! - Entity schemas: the allow-lists every identifier in SQL text comes from
//!
//! # Type Decisions
//!
//! **Why one `Value` enum instead of generic row decoding?**
//! Each store returns loosely typed cells (SQLite has no boolean type, Postgres
//! counts are `INT8`). Normalizing into a small enum keeps the mapper
//! store-agnostic; typed decoding happens once, by label, in `ResultMapper`.
//!
//! **Why `i64` for ids and counts?**
//! Both stores hand integers back as 64-bit values. Using `i64` throughout
//! avoids lossy conversions.

mod backend;
mod config;
mod connection;
mod postgres;
pub mod schema;
mod value;

pub use backend::{CancelFlag, DatabaseBackend, ExecContext, QueryResult};
pub use config::DatabaseConfig;
pub use connection::{SqliteBackend, SqliteConfig};
pub use postgres::{PostgresBackend, PostgresConfig};
pub use value::{DatabaseValue, Value};

/// Open an empty in-memory SQLite store.
///
/// Used by tests and the `:memory:` database URL.
pub fn open_mem_db() -> Result<Box<dyn DatabaseBackend>, crate::error::ExecutionError> {
    Ok(Box::new(SqliteBackend::in_memory()?))
}
