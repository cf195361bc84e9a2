//! Backend-specific query compilation helpers.
//!
//! Clause fragments are written once with the neutral `?` marker and a
//! dialect-neutral comparison. A `BackendCompiler` supplies what differs
//! between stores: the final placeholder syntax and the case-insensitive
//! substring operator.

pub mod postgres;
pub mod sqlite;

use super::PLACEHOLDER;
use crate::db::DatabaseBackend;
use crate::error::CompileError;

/// Trait for backend-specific query compilation.
pub trait BackendCompiler: Send + Sync {
    /// Backend name this compiler serves, as reported by the store.
    fn backend_name(&self) -> &'static str;

    /// Placeholder for the bound argument at a 1-based position.
    ///
    /// For example:
    /// - SQLite: `parameter_placeholder(3)` -> `"?"`
    /// - Postgres: `parameter_placeholder(3)` -> `"$3"`
    fn parameter_placeholder(&self, index: usize) -> String;

    /// Operator for a case-insensitive substring comparison.
    fn contains_operator(&self) -> &'static str;

    /// Argument bound to a "contains" comparison.
    fn contains_pattern(&self, term: &str) -> String {
        format!("%{}%", term)
    }

    /// Compile a case-insensitive "contains" comparison of a column against
    /// one marker.
    fn compile_contains(&self, column: &str) -> String {
        self.compile_filter(column, self.contains_operator())
    }

    /// Compile a filter expression against a single marker.
    fn compile_filter(&self, field: &str, op: &str) -> String {
        format!("{} {} {}", field, op, PLACEHOLDER)
    }
}

/// Get the compiler matching a store.
pub fn get_compiler(backend: &dyn DatabaseBackend) -> Result<Box<dyn BackendCompiler>, CompileError> {
    compiler_for(backend.backend_name())
}

/// Get a compiler by backend name.
pub fn compiler_for(name: &str) -> Result<Box<dyn BackendCompiler>, CompileError> {
    match name {
        "Sqlite" => Ok(Box::new(sqlite::SqliteCompiler)),
        "Postgres" => Ok(Box::new(postgres::PostgresCompiler)),
        other => Err(CompileError::UnsupportedBackend {
            backend: other.to_string(),
        }),
    }
}
