//! Error types for the search pipeline.
//!
//! Each stage of the pipeline has its own error enum. `SearchError` wraps them
//! transparently so callers see the original message while still being able
//! to ask which stage failed.

use std::fmt;

use thiserror::Error;

/// A search request was rejected before any query was built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("field '{field}' on {entity} cannot be used for {usage}")]
    FieldNotAllowed {
        entity: &'static str,
        field: String,
        usage: &'static str,
    },

    #[error("field '{field}' on {entity} expects a {expected} value, got {actual}")]
    ValueType {
        entity: &'static str,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("limit must be greater than 0, got {0}")]
    InvalidLimit(i64),

    #[error("offset must not be negative, got {0}")]
    InvalidOffset(i64),
}

/// Internal invariant violation while rendering a query.
///
/// Correct code never produces these; they exist so a defect fails loudly
/// instead of sending a malformed statement to the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("placeholder mismatch: {markers} markers for {arguments} arguments")]
    PlaceholderMismatch { markers: usize, arguments: usize },

    #[error("composite clause has no children")]
    EmptyComposite,

    #[error("unsupported backend: {backend}")]
    UnsupportedBackend { backend: String },
}

/// The store could not run the query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("failed to connect to {backend}: {message}")]
    ConnectionFailed { backend: String, message: String },

    #[error("{backend} query failed: {message}")]
    QueryFailed { backend: String, message: String },

    #[error("query deadline exceeded")]
    DeadlineExceeded,

    #[error("query cancelled")]
    Cancelled,

    /// A returned cell could not be turned into a `Value`. Surfaces from
    /// `SearchError` as a mapping failure.
    #[error(transparent)]
    Undecodable(#[from] MappingError),
}

/// A result row did not match the projection it was decoded against.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("row {row} has {actual} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {index} is '{actual}', expected '{expected}'")]
    ColumnName {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("column '{name}' is not part of the projection")]
    MissingColumn { name: String },

    #[error("row {row} column '{column}': expected {expected}, found {actual}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("expected exactly one row, found {0}")]
    ExpectedSingleRow(usize),

    #[error("row {row} column '{column}' cannot be decoded: {reason}")]
    Undecodable {
        row: usize,
        column: String,
        reason: String,
    },
}

/// Pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Compile,
    Execute,
    Map,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::Compile => "compile",
            Stage::Execute => "execute",
            Stage::Map => "map",
        };
        f.write_str(name)
    }
}

/// Any failure of a search, stats or ranking call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Execution(ExecutionError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl From<ExecutionError> for SearchError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Undecodable(mapping) => SearchError::Mapping(mapping),
            other => SearchError::Execution(other),
        }
    }
}

impl SearchError {
    pub fn stage(&self) -> Stage {
        match self {
            SearchError::Validation(_) => Stage::Validate,
            SearchError::Compile(_) => Stage::Compile,
            SearchError::Execution(_) => Stage::Execute,
            SearchError::Mapping(_) => Stage::Map,
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_stage_of_each_variant() {
        let v: SearchError = ValidationError::InvalidLimit(0).into();
        let c: SearchError = CompileError::EmptyComposite.into();
        let e: SearchError = ExecutionError::Cancelled.into();
        let m: SearchError = MappingError::ExpectedSingleRow(2).into();

        assert_eq!(v.stage(), Stage::Validate);
        assert_eq!(c.stage(), Stage::Compile);
        assert_eq!(e.stage(), Stage::Execute);
        assert_eq!(m.stage(), Stage::Map);
    }

    #[rstest]
    fn test_undecodable_cell_is_a_mapping_failure() {
        let cell = MappingError::Undecodable {
            row: 2,
            column: "data".to_string(),
            reason: "unsupported type bytea".to_string(),
        };
        let err: SearchError = ExecutionError::Undecodable(cell.clone()).into();
        assert_eq!(err.stage(), Stage::Map);
        assert_eq!(err, SearchError::Mapping(cell));
    }

    #[rstest]
    fn test_transparent_message() {
        let err: SearchError = ValidationError::InvalidOffset(-1).into();
        assert_eq!(err.to_string(), "offset must not be negative, got -1");
    }

    #[rstest]
    fn test_stage_display() {
        assert_eq!(Stage::Compile.to_string(), "compile");
    }
}
