//! PostgreSQL backend compiler.
//!
//! Implements `BackendCompiler` for PostgreSQL, which uses:
//! - numbered `$n` placeholders
//! - `ILIKE` for case-insensitive matching

use super::BackendCompiler;

/// PostgreSQL backend compiler implementation.
#[derive(Debug, Clone, Copy)]
pub struct PostgresCompiler;

impl BackendCompiler for PostgresCompiler {
    fn backend_name(&self) -> &'static str {
        "Postgres"
    }

    fn parameter_placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn contains_operator(&self) -> &'static str {
        "ILIKE"
    }
}
