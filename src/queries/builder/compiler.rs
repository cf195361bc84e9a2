//! Rendering of single-table search statements.

use super::compilers::BackendCompiler;
use super::helpers::format_fields;
use super::{Clause, CompiledQuery, StatementBuilder};
use crate::db::schema::{EntitySchema, FieldUsage};
use crate::error::{CompileError, ValidationError};
use crate::queries::filter::{FilterSpec, SortDirection};

/// One ORDER BY key: an allow-listed expression and its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    pub expr: String,
    pub direction: SortDirection,
}

impl OrderTerm {
    pub fn new(expr: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            expr: expr.into(),
            direction,
        }
    }

    /// Resolve the requested order field against the schema.
    pub fn from_spec(
        spec: &FilterSpec,
        schema: &EntitySchema,
    ) -> Result<Option<Self>, ValidationError> {
        spec.order_field
            .as_deref()
            .map(|name| {
                let field = schema.resolve(name, FieldUsage::Order)?;
                Ok(Self::new(field.expr.sql(None), spec.order_direction))
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn from_spec(spec: &FilterSpec) -> Self {
        Self {
            limit: spec.limit,
            offset: spec.offset,
        }
    }
}

/// Renders `SELECT ... FROM ... [WHERE ...] [ORDER BY ...] LIMIT ? OFFSET ?`.
///
/// Holds no per-call state, so one instance may serve concurrent callers.
pub struct QueryCompiler<'a> {
    dialect: &'a dyn BackendCompiler,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(dialect: &'a dyn BackendCompiler) -> Self {
        Self { dialect }
    }

    pub fn compile(
        &self,
        projection: &[&str],
        table: &str,
        predicate: Option<&Clause>,
        ordering: &[OrderTerm],
        pagination: Pagination,
    ) -> Result<CompiledQuery, CompileError> {
        let mut stmt = StatementBuilder::new();
        stmt.push_sql("SELECT ")
            .push_sql(&format_fields(projection))
            .push_sql(" FROM ")
            .push_sql(table);

        if let Some(clause) = predicate {
            stmt.push_sql(" WHERE ");
            stmt.push_clause(clause)?;
        }

        push_order_by(&mut stmt, ordering);

        stmt.push_sql(" LIMIT ")
            .bind(pagination.limit)
            .push_sql(" OFFSET ")
            .bind(pagination.offset);

        stmt.finish(self.dialect)
    }
}

pub(crate) fn push_order_by(stmt: &mut StatementBuilder, ordering: &[OrderTerm]) {
    for (i, term) in ordering.iter().enumerate() {
        stmt.push_sql(if i == 0 { " ORDER BY " } else { ", " })
            .push_sql(&term.expr)
            .push_sql(" ")
            .push_sql(term.direction.keyword());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::POSTS;
    use crate::db::Value;
    use crate::queries::builder::compilers::{postgres::PostgresCompiler, sqlite::SqliteCompiler};
    use crate::queries::builder::helpers::count_markers;
    use crate::queries::builder::predicate::PredicateBuilder;
    use rstest::rstest;

    const SELECT_POSTS: &str =
        "SELECT id, user_id, title, content, published, created_at, updated_at FROM posts";

    fn compile_with(spec: &FilterSpec, dialect: &dyn BackendCompiler) -> CompiledQuery {
        let predicate = PredicateBuilder::new(&POSTS, dialect).build(spec).unwrap();
        let ordering: Vec<_> = OrderTerm::from_spec(spec, &POSTS).unwrap().into_iter().collect();
        QueryCompiler::new(dialect)
            .compile(
                POSTS.projection,
                POSTS.table,
                predicate.as_ref(),
                &ordering,
                Pagination::from_spec(spec),
            )
            .unwrap()
    }

    fn compile(spec: &FilterSpec) -> CompiledQuery {
        compile_with(spec, &SqliteCompiler)
    }

    #[rstest]
    fn test_no_predicate_no_where() {
        let compiled = compile(&FilterSpec::new());
        assert_eq!(compiled.text, format!("{} LIMIT ? OFFSET ?", SELECT_POSTS));
        assert_eq!(compiled.arguments, vec![Value::Int(50), Value::Int(0)]);
        assert!(!compiled.text.contains("WHERE"));
    }

    #[rstest]
    fn test_full_spec_sqlite() {
        let spec = FilterSpec::new()
            .text("golang")
            .equals("published", true)
            .at_least("word_count", 10)
            .order_by("created_at", SortDirection::Desc)
            .limit(5)
            .offset(10);
        let compiled = compile(&spec);

        assert_eq!(
            compiled.text,
            format!(
                "{} WHERE (unicode_lower(title) LIKE unicode_lower(?) \
                 OR unicode_lower(content) LIKE unicode_lower(?)) AND published = ? \
                 AND (LENGTH(content) - LENGTH(REPLACE(content, ' ', '')) + 1) >= ? \
                 ORDER BY created_at DESC LIMIT ? OFFSET ?",
                SELECT_POSTS
            )
        );
        assert_eq!(
            compiled.arguments,
            vec![
                Value::from("%golang%"),
                Value::from("%golang%"),
                Value::Bool(true),
                Value::Int(10),
                Value::Int(5),
                Value::Int(10),
            ]
        );
    }

    #[rstest]
    fn test_full_spec_postgres_renumbers() {
        let spec = FilterSpec::new()
            .text("golang")
            .equals("user_id", 7)
            .order_by("id", SortDirection::Asc);
        let compiled = compile_with(&spec, &PostgresCompiler);

        assert_eq!(
            compiled.text,
            format!(
                "{} WHERE (title ILIKE $1 OR content ILIKE $2) AND user_id = $3 \
                 ORDER BY id ASC LIMIT $4 OFFSET $5",
                SELECT_POSTS
            )
        );
        assert_eq!(compiled.param_count(), 5);
    }

    #[rstest]
    fn test_unrecognized_direction_sorts_ascending() {
        let spec = FilterSpec::new().order_by("title", SortDirection::parse_lenient("down"));
        assert!(compile(&spec).text.contains("ORDER BY title ASC"));
    }

    #[rstest]
    #[case(FilterSpec::new())]
    #[case(FilterSpec::new().text("a"))]
    #[case(FilterSpec::new().text("a").equals("user_id", 1).equals("published", false))]
    #[case(FilterSpec::new().at_least("word_count", 2).order_by("id", SortDirection::Desc))]
    fn test_markers_match_arguments(#[case] spec: FilterSpec) {
        let compiled = compile(&spec);
        assert_eq!(count_markers(&compiled.text), compiled.arguments.len());
    }

    #[rstest]
    fn test_compilation_is_deterministic() {
        let spec = FilterSpec::new()
            .text("rust")
            .equals("user_id", 1)
            .order_by("updated_at", SortDirection::Desc);
        assert_eq!(compile(&spec), compile(&spec));
    }

    #[rstest]
    fn test_multiple_order_terms() {
        let compiled = QueryCompiler::new(&SqliteCompiler)
            .compile(
                &["id"],
                "users",
                None,
                &[
                    OrderTerm::new("name", SortDirection::Asc),
                    OrderTerm::new("id", SortDirection::Desc),
                ],
                Pagination { limit: 1, offset: 0 },
            )
            .unwrap();
        assert_eq!(
            compiled.text,
            "SELECT id FROM users ORDER BY name ASC, id DESC LIMIT ? OFFSET ?"
        );
    }

    #[rstest]
    fn test_order_field_outside_allow_list() {
        let spec = FilterSpec::new().order_by("word_count", SortDirection::Asc);
        assert!(matches!(
            OrderTerm::from_spec(&spec, &POSTS),
            Err(ValidationError::FieldNotAllowed { .. })
        ));
    }
}
