//! Decoding of result rows into typed records.
//!
//! A `RowLayout` is built from the same projection list that was handed to
//! the compiler. Before any row is decoded the store's headers are checked
//! against it, so a misaligned projection fails instead of silently reading
//! the wrong columns. Records read cells by label through a `RowReader`.

use std::collections::HashMap;

use crate::db::schema::EntitySchema;
use crate::db::{DatabaseValue, QueryResult, Value};
use crate::error::MappingError;

/// Expected column names and their positions.
#[derive(Debug, Clone)]
pub struct RowLayout {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl RowLayout {
    pub fn new(columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { columns, index }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check store-reported headers against the layout, in order.
    pub fn verify_headers(&self, headers: &[String]) -> Result<(), MappingError> {
        if headers.len() != self.columns.len() {
            return Err(MappingError::ColumnCount {
                row: 0,
                expected: self.columns.len(),
                actual: headers.len(),
            });
        }
        for (index, (expected, actual)) in self.columns.iter().zip(headers).enumerate() {
            if expected != actual {
                return Err(MappingError::ColumnName {
                    index,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize, MappingError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| MappingError::MissingColumn {
                name: name.to_string(),
            })
    }
}

/// Label-based access to one row.
pub struct RowReader<'a> {
    layout: &'a RowLayout,
    cells: &'a [Value],
    row: usize,
}

impl<'a> RowReader<'a> {
    pub fn new(layout: &'a RowLayout, cells: &'a [Value], row: usize) -> Self {
        Self { layout, cells, row }
    }

    fn cell(&self, name: &str) -> Result<&'a Value, MappingError> {
        let idx = self.layout.position(name)?;
        // Row width is checked before readers are created.
        self.cells.get(idx).ok_or(MappingError::ColumnCount {
            row: self.row,
            expected: self.layout.len(),
            actual: self.cells.len(),
        })
    }

    fn mismatch(&self, name: &str, expected: &'static str, value: &Value) -> MappingError {
        MappingError::TypeMismatch {
            row: self.row,
            column: name.to_string(),
            expected,
            actual: value.type_name(),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, MappingError> {
        let value = self.cell(name)?;
        match value {
            Value::Int(i) => Ok(*i),
            other => Err(self.mismatch(name, "int", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<String, MappingError> {
        let value = self.cell(name)?;
        match value {
            Value::Text(s) => Ok(s.clone()),
            other => Err(self.mismatch(name, "text", other)),
        }
    }

    pub fn opt_text(&self, name: &str) -> Result<Option<String>, MappingError> {
        match self.cell(name)? {
            Value::Null => Ok(None),
            _ => self.text(name).map(Some),
        }
    }

    /// Booleans come back as 0/1 integers from SQLite.
    pub fn bool(&self, name: &str) -> Result<bool, MappingError> {
        let value = self.cell(name)?;
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            other => Err(self.mismatch(name, "bool", other)),
        }
    }

    /// A float that reads as `0.0` when NULL (aggregates over no rows).
    pub fn float_or_zero(&self, name: &str) -> Result<f64, MappingError> {
        let value = self.cell(name)?;
        match value {
            Value::Null => Ok(0.0),
            Value::Float(_) | Value::Int(_) => Ok(value.as_f64_or(0.0)),
            other => Err(self.mismatch(name, "float", other)),
        }
    }
}

/// Types decodable from a result row.
pub trait FromRow: Sized {
    fn from_row(row: &RowReader<'_>) -> Result<Self, MappingError>;
}

/// A searchable entity record.
///
/// Ties a record type to its schema so a search compiles and decodes against
/// the same projection.
pub trait Record: FromRow {
    const SCHEMA: &'static EntitySchema;
}

/// Decodes a `QueryResult` against a fixed layout.
#[derive(Debug, Clone)]
pub struct ResultMapper {
    layout: RowLayout,
}

impl ResultMapper {
    /// Build a mapper for the projection the query was compiled with.
    pub fn for_projection(columns: &[&str]) -> Self {
        Self {
            layout: RowLayout::new(columns),
        }
    }

    /// Decode every row, or none: the first failing row fails the whole call.
    pub fn map<T: FromRow>(&self, result: &QueryResult) -> Result<Vec<T>, MappingError> {
        if result.headers.is_empty() && result.rows.is_empty() {
            return Ok(Vec::new());
        }
        self.layout.verify_headers(&result.headers)?;

        result
            .rows
            .iter()
            .enumerate()
            .map(|(i, cells)| {
                if cells.len() != self.layout.len() {
                    return Err(MappingError::ColumnCount {
                        row: i,
                        expected: self.layout.len(),
                        actual: cells.len(),
                    });
                }
                T::from_row(&RowReader::new(&self.layout, cells, i))
            })
            .collect()
    }

    /// Decode a result that must hold exactly one row.
    pub fn map_one<T: FromRow>(&self, result: &QueryResult) -> Result<T, MappingError> {
        let mut rows = self.map::<T>(result)?;
        if rows.len() != 1 {
            return Err(MappingError::ExpectedSingleRow(rows.len()));
        }
        rows.pop().ok_or(MappingError::ExpectedSingleRow(0))
    }
}
