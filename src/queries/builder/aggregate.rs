//! Join + group-by statements for statistics and rankings.
//!
//! An `AggregationSpec` lists grouping keys and labelled aggregate
//! projections. The labels double as the row layout the result is decoded
//! against, so the statement and its mapper are always built from the same
//! list.

use super::compiler::{push_order_by, OrderTerm};
use super::compilers::BackendCompiler;
use super::helpers::qualify;
use super::{CompiledQuery, StatementBuilder};
use crate::error::{CompileError, SearchError, ValidationError};
use crate::queries::filter::SortDirection;

/// Aggregate (or grouped plain) expression behind a projected label.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateExpr {
    /// A grouping column, projected as is.
    Column(String),
    Count(String),
    CountDistinct(String),
    /// Rows where a boolean condition holds, as `COUNT(CASE WHEN .. THEN 1 END)`.
    CountWhere(String),
    /// Average as double precision, so both stores return a float.
    Avg(String),
    Max(String),
}

impl AggregateExpr {
    pub fn sql(&self) -> String {
        match self {
            AggregateExpr::Column(expr) => expr.clone(),
            AggregateExpr::Count(expr) => format!("COUNT({})", expr),
            AggregateExpr::CountDistinct(expr) => format!("COUNT(DISTINCT {})", expr),
            AggregateExpr::CountWhere(cond) => format!("COUNT(CASE WHEN {} THEN 1 END)", cond),
            AggregateExpr::Avg(expr) => format!("CAST(AVG({}) AS DOUBLE PRECISION)", expr),
            AggregateExpr::Max(expr) => format!("MAX({})", expr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// `FROM <left> <alias> <kind> <right> <alias> ON <left_key> = <right_key>`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub left: (&'static str, &'static str),
    pub right: (&'static str, &'static str),
    pub kind: JoinKind,
    pub left_key: &'static str,
    pub right_key: &'static str,
}

impl JoinSpec {
    fn sql(&self) -> String {
        format!(
            "{} {} {} {} {} ON {} = {}",
            self.left.0,
            self.left.1,
            self.kind.keyword(),
            self.right.0,
            self.right.1,
            qualify(Some(self.left.1), self.left_key),
            qualify(Some(self.right.1), self.right_key),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSpec {
    pub grouping_keys: Vec<String>,
    pub projections: Vec<(&'static str, AggregateExpr)>,
}

impl AggregationSpec {
    /// Projected labels in column order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.projections.iter().map(|(label, _)| *label).collect()
    }
}

/// Posts statistics over `posts p JOIN users u`.
pub fn post_stats_spec() -> AggregationSpec {
    AggregationSpec {
        grouping_keys: Vec::new(),
        projections: vec![
            ("total_posts", AggregateExpr::Count("p.id".into())),
            (
                "published_posts",
                AggregateExpr::CountWhere("p.published = TRUE".into()),
            ),
            ("active_users", AggregateExpr::CountDistinct("p.user_id".into())),
            (
                "avg_content_length",
                AggregateExpr::Avg("LENGTH(p.content)".into()),
            ),
        ],
    }
}

pub const POSTS_BY_AUTHOR: JoinSpec = JoinSpec {
    left: ("posts", "p"),
    right: ("users", "u"),
    kind: JoinKind::Inner,
    left_key: "user_id",
    right_key: "id",
};

/// Users ranked by post count, including users without posts.
pub fn top_users_spec() -> AggregationSpec {
    AggregationSpec {
        grouping_keys: vec!["u.id".into(), "u.name".into(), "u.email".into()],
        projections: vec![
            ("id", AggregateExpr::Column("u.id".into())),
            ("name", AggregateExpr::Column("u.name".into())),
            ("email", AggregateExpr::Column("u.email".into())),
            ("post_count", AggregateExpr::Count("p.id".into())),
            (
                "published_count",
                AggregateExpr::CountWhere("p.published = TRUE".into()),
            ),
            ("last_post_date", AggregateExpr::Max("p.created_at".into())),
        ],
    }
}

pub const USERS_WITH_POSTS: JoinSpec = JoinSpec {
    left: ("users", "u"),
    right: ("posts", "p"),
    kind: JoinKind::Left,
    left_key: "id",
    right_key: "user_id",
};

pub struct AggregationAssembler<'a> {
    dialect: &'a dyn BackendCompiler,
}

impl<'a> AggregationAssembler<'a> {
    pub fn new(dialect: &'a dyn BackendCompiler) -> Self {
        Self { dialect }
    }

    /// Render `SELECT <expr AS label>.. FROM <join> [GROUP BY ..] [ORDER BY ..] [LIMIT ?]`.
    pub fn assemble(
        &self,
        spec: &AggregationSpec,
        join: &JoinSpec,
        ordering: &[OrderTerm],
        limit: Option<i64>,
    ) -> Result<CompiledQuery, CompileError> {
        let projection = spec
            .projections
            .iter()
            .map(|(label, expr)| format!("{} AS {}", expr.sql(), label))
            .collect::<Vec<_>>()
            .join(", ");

        let mut stmt = StatementBuilder::new();
        stmt.push_sql("SELECT ")
            .push_sql(&projection)
            .push_sql(" FROM ")
            .push_sql(&join.sql());

        if !spec.grouping_keys.is_empty() {
            stmt.push_sql(" GROUP BY ")
                .push_sql(&spec.grouping_keys.join(", "));
        }

        push_order_by(&mut stmt, ordering);

        if let Some(limit) = limit {
            stmt.push_sql(" LIMIT ").bind(limit);
        }

        stmt.finish(self.dialect)
    }

    /// Single-row post statistics. No WHERE, no GROUP BY.
    pub fn build_stats(&self) -> Result<CompiledQuery, CompileError> {
        self.assemble(&post_stats_spec(), &POSTS_BY_AUTHOR, &[], None)
    }

    /// Top `limit` users by post count; ties broken by user id.
    pub fn build_top_entities(&self, limit: i64) -> Result<CompiledQuery, SearchError> {
        if limit <= 0 {
            return Err(ValidationError::InvalidLimit(limit).into());
        }
        let ordering = [
            OrderTerm::new("post_count", SortDirection::Desc),
            OrderTerm::new("u.id", SortDirection::Asc),
        ];
        Ok(self.assemble(&top_users_spec(), &USERS_WITH_POSTS, &ordering, Some(limit))?)
    }
}
