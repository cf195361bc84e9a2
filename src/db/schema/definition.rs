//! Core schema definition types.
//!
//! An `EntitySchema` is the fixed, compile-time description of one searchable
//! table: what it projects, which columns take part in free-text search, and
//! which fields callers may filter or order by. Every identifier that ends up
//! in SQL text comes from one of these definitions, never from caller input.

use crate::db::Value;
use crate::error::ValidationError;
use crate::queries::builder::helpers::{qualify, word_count_expr};

/// Represents a column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Text,
    Int,
    Float,
    Bool,
    Timestamp,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::Timestamp => "timestamp",
        }
    }

    /// Whether a bound argument of this kind can be compared with the field.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (DataType::Text, Value::Text(_))
                | (DataType::Timestamp, Value::Text(_))
                | (DataType::Int, Value::Int(_))
                | (DataType::Float, Value::Int(_) | Value::Float(_))
                | (DataType::Bool, Value::Bool(_))
        )
    }
}

/// How a field may be referenced by a filter spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUsage {
    Equality,
    Threshold,
    Order,
}

impl FieldUsage {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldUsage::Equality => "equality filtering",
            FieldUsage::Threshold => "a minimum threshold",
            FieldUsage::Order => "ordering",
        }
    }
}

/// SQL expression behind a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldExpr {
    /// A plain column.
    Column(&'static str),
    /// Approximate word count of a text column, see `word_count_expr`.
    WordCount(&'static str),
}

impl FieldExpr {
    /// Render the expression, optionally qualified with a table alias.
    pub fn sql(&self, alias: Option<&str>) -> String {
        match self {
            FieldExpr::Column(col) => qualify(alias, col),
            FieldExpr::WordCount(col) => word_count_expr(&qualify(alias, col)),
        }
    }
}

/// A named field callers may reference.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// Name callers use (e.g., "user_id", "word_count")
    pub name: &'static str,

    pub expr: FieldExpr,

    pub data_type: DataType,

    /// Ways this field may be used
    pub usages: &'static [FieldUsage],
}

impl SchemaField {
    pub fn allows(&self, usage: FieldUsage) -> bool {
        self.usages.contains(&usage)
    }
}

/// A searchable table and its allow-lists.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    /// Entity name for error messages (e.g., "posts")
    pub entity: &'static str,

    pub table: &'static str,

    /// Columns selected by a search, in decode order
    pub projection: &'static [&'static str],

    /// Columns matched by the free-text term, OR-ed together
    pub text_columns: &'static [&'static str],

    /// Allow-listed fields for equality, threshold and ordering
    pub fields: &'static [SchemaField],

    /// Condition every search of this entity applies, with no bound values
    /// (e.g., excluding soft-deleted rows)
    pub scope: Option<&'static str>,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field and check it may be used the requested way.
    pub fn resolve(&self, name: &str, usage: FieldUsage) -> Result<&SchemaField, ValidationError> {
        let field = self.field(name).ok_or_else(|| ValidationError::UnknownField {
            entity: self.entity,
            field: name.to_string(),
        })?;

        if !field.allows(usage) {
            return Err(ValidationError::FieldNotAllowed {
                entity: self.entity,
                field: name.to_string(),
                usage: usage.describe(),
            });
        }

        Ok(field)
    }
}
