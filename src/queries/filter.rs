//! Search criteria.
//!
//! A `FilterSpec` describes what a caller asked for. It names fields by their
//! caller-visible names only; `validate` checks every name against an entity
//! allow-list before anything is built from it.

use serde::Serialize;

use crate::db::schema::{EntitySchema, FieldUsage, SchemaField};
use crate::db::{DatabaseValue, Value};
use crate::error::ValidationError;

pub const DEFAULT_LIMIT: i64 = 50;

/// Sort direction for an ordered search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a caller-supplied direction.
    ///
    /// Only a case-insensitive "desc" sorts descending; anything else,
    /// including typos, sorts ascending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Requested search criteria for one entity.
///
/// Equality filters holding `Value::Null` mean "not specified" and are
/// skipped, never compiled to `IS NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub text_term: Option<String>,
    pub equality_filters: Vec<(String, Value)>,
    pub numeric_threshold: Option<(String, Value)>,
    pub limit: i64,
    pub offset: i64,
    pub order_field: Option<String>,
    pub order_direction: SortDirection,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            text_term: None,
            equality_filters: Vec::new(),
            numeric_threshold: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            order_field: None,
            order_direction: SortDirection::Asc,
        }
    }
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, term: impl Into<String>) -> Self {
        self.text_term = Some(term.into());
        self
    }

    /// Add an equality filter. `None` values are kept but ignored.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.equality_filters.push((field.into(), value.into()));
        self
    }

    pub fn at_least(mut self, field: impl Into<String>, min: impl Into<Value>) -> Self {
        self.numeric_threshold = Some((field.into(), min.into()));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_field = Some(field.into());
        self.order_direction = direction;
        self
    }

    /// The free-text term, when one was given and is not empty.
    pub fn active_text_term(&self) -> Option<&str> {
        self.text_term.as_deref().filter(|t| !t.is_empty())
    }

    /// Equality filters that constrain the result, in insertion order.
    pub fn active_equality_filters(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.equality_filters
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(f, v)| (f.as_str(), v))
    }

    /// Reject anything that must not reach the query builder.
    pub fn validate(&self, schema: &EntitySchema) -> Result<(), ValidationError> {
        if self.limit <= 0 {
            return Err(ValidationError::InvalidLimit(self.limit));
        }
        if self.offset < 0 {
            return Err(ValidationError::InvalidOffset(self.offset));
        }

        for (field, value) in &self.equality_filters {
            let resolved = schema.resolve(field, FieldUsage::Equality)?;
            if !value.is_null() {
                check_value(schema, resolved, value)?;
            }
        }

        if let Some((field, min)) = &self.numeric_threshold {
            let resolved = schema.resolve(field, FieldUsage::Threshold)?;
            check_value(schema, resolved, min)?;
        }

        if let Some(field) = &self.order_field {
            schema.resolve(field, FieldUsage::Order)?;
        }

        Ok(())
    }
}

/// Check a bound value against the field's declared type.
pub(crate) fn check_value(
    schema: &EntitySchema,
    field: &SchemaField,
    value: &Value,
) -> Result<(), ValidationError> {
    if field.data_type.accepts(value) {
        Ok(())
    } else {
        Err(ValidationError::ValueType {
            entity: schema.entity,
            field: field.name.to_string(),
            expected: field.data_type.name(),
            actual: value.type_name(),
        })
    }
}
