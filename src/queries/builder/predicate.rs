//! Translation of a `FilterSpec` into a `Clause` tree.
//!
//! Rules are applied in a fixed order so output is deterministic:
//! 0. the entity's fixed scope, if its schema declares one
//! 1. free-text term: OR of "contains" comparisons across the text columns
//! 2. equality filters, in insertion order, skipping unset values
//! 3. numeric threshold (`>=`), which may target a derived expression
//!
//! Emitted clauses are AND-ed. When nothing applies the builder returns
//! `None` and no WHERE clause is written at all.

use super::compilers::BackendCompiler;
use super::Clause;
use crate::db::schema::{EntitySchema, FieldUsage};
use crate::error::ValidationError;
use crate::queries::filter::{check_value, FilterSpec};

pub struct PredicateBuilder<'a> {
    schema: &'a EntitySchema,
    dialect: &'a dyn BackendCompiler,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(schema: &'a EntitySchema, dialect: &'a dyn BackendCompiler) -> Self {
        Self { schema, dialect }
    }

    pub fn build(&self, spec: &FilterSpec) -> Result<Option<Clause>, ValidationError> {
        let mut clauses = Vec::new();

        if let Some(scope) = self.schema.scope {
            clauses.push(Clause::fixed(scope));
        }

        if let Some(term) = spec.active_text_term() {
            clauses.push(self.text_clause(term));
        }

        for (name, value) in spec.active_equality_filters() {
            let field = self.schema.resolve(name, FieldUsage::Equality)?;
            check_value(self.schema, field, value)?;
            let fragment = self.dialect.compile_filter(&field.expr.sql(None), "=");
            clauses.push(Clause::predicate(fragment, value.clone()));
        }

        if let Some((name, min)) = &spec.numeric_threshold {
            let field = self.schema.resolve(name, FieldUsage::Threshold)?;
            check_value(self.schema, field, min)?;
            let fragment = self.dialect.compile_filter(&field.expr.sql(None), ">=");
            clauses.push(Clause::predicate(fragment, min.clone()));
        }

        Ok(match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Clause::and(clauses)),
        })
    }

    fn text_clause(&self, term: &str) -> Clause {
        let pattern = self.dialect.contains_pattern(term);
        let children = self
            .schema
            .text_columns
            .iter()
            .map(|col| Clause::predicate(self.dialect.compile_contains(col), pattern.as_str()))
            .collect();
        Clause::or(children)
    }
}
