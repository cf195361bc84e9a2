//! SQLite backend compiler.
//!
//! Implements `BackendCompiler` for SQLite, which uses:
//! - positional `?` placeholders, bound in order
//! - `LIKE` over both sides folded by `unicode_lower`, since `LIKE` alone
//!   only folds ASCII letters

use super::BackendCompiler;
use crate::queries::builder::PLACEHOLDER;

/// Scalar function registered on every pooled connection by `SqliteBackend`.
pub const LOWER_FN: &str = "unicode_lower";

/// SQLite backend compiler implementation.
#[derive(Debug, Clone, Copy)]
pub struct SqliteCompiler;

impl BackendCompiler for SqliteCompiler {
    fn backend_name(&self) -> &'static str {
        "Sqlite"
    }

    fn parameter_placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn contains_operator(&self) -> &'static str {
        "LIKE"
    }

    fn compile_contains(&self, column: &str) -> String {
        format!(
            "{f}({col}) {op} {f}({marker})",
            f = LOWER_FN,
            col = column,
            op = self.contains_operator(),
            marker = PLACEHOLDER
        )
    }
}
