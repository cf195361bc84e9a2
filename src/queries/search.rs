//! The caller-facing search pipeline.
//!
//! validate → build predicate → compile → execute → map. Every stage reports
//! failures through `SearchError`, so callers can tell which one failed.

use crate::db::{DatabaseBackend, ExecContext, QueryResult};
use crate::error::{ExecutionError, SearchResult};
use crate::queries::builder::aggregate::{post_stats_spec, top_users_spec, AggregationAssembler};
use crate::queries::builder::compiler::{OrderTerm, Pagination, QueryCompiler};
use crate::queries::builder::compilers::{get_compiler, BackendCompiler};
use crate::queries::builder::predicate::PredicateBuilder;
use crate::queries::builder::CompiledQuery;
use crate::queries::filter::{FilterSpec, SortDirection};
use crate::queries::mapper::{Record, ResultMapper};
use crate::types::{Category, Post, PostStats, RankedUser, User};

/// Runs searches against one injected store.
///
/// Holds no per-call state; the dialect is chosen once from the store's
/// backend name.
pub struct SearchService<'a> {
    backend: &'a dyn DatabaseBackend,
    dialect: Box<dyn BackendCompiler>,
}

impl<'a> SearchService<'a> {
    pub fn new(backend: &'a dyn DatabaseBackend) -> SearchResult<Self> {
        let dialect = get_compiler(backend)?;
        Ok(Self { backend, dialect })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Filtered, ordered, paginated search over one entity.
    pub fn search<T: Record>(&self, spec: &FilterSpec, ctx: &ExecContext) -> SearchResult<Vec<T>> {
        let schema = T::SCHEMA;
        spec.validate(schema)?;

        let predicate = PredicateBuilder::new(schema, self.dialect.as_ref()).build(spec)?;
        let ordering: Vec<OrderTerm> = OrderTerm::from_spec(spec, schema)?.into_iter().collect();

        let mapper = ResultMapper::for_projection(schema.projection);
        let query = QueryCompiler::new(self.dialect.as_ref()).compile(
            schema.projection,
            schema.table,
            predicate.as_ref(),
            &ordering,
            Pagination::from_spec(spec),
        )?;

        let result = self.execute(&query, ctx)?;
        let records = mapper.map(&result)?;
        tracing::debug!(entity = schema.entity, rows = records.len(), "mapped search results");
        Ok(records)
    }

    pub fn search_posts(&self, spec: &FilterSpec, ctx: &ExecContext) -> SearchResult<Vec<Post>> {
        self.search(spec, ctx)
    }

    /// Users whose name contains `name_query`, ordered by name.
    pub fn search_users(
        &self,
        name_query: &str,
        limit: i64,
        ctx: &ExecContext,
    ) -> SearchResult<Vec<User>> {
        let spec = FilterSpec::new()
            .text(name_query)
            .order_by("name", SortDirection::Asc)
            .limit(limit);
        self.search(&spec, ctx)
    }

    /// Live categories whose name contains `name_query`, ordered by name.
    pub fn search_categories(
        &self,
        name_query: &str,
        limit: i64,
        ctx: &ExecContext,
    ) -> SearchResult<Vec<Category>> {
        let spec = FilterSpec::new()
            .text(name_query)
            .order_by("name", SortDirection::Asc)
            .limit(limit);
        self.search(&spec, ctx)
    }

    /// Post statistics across all authors.
    pub fn stats(&self, ctx: &ExecContext) -> SearchResult<PostStats> {
        let spec = post_stats_spec();
        let mapper = ResultMapper::for_projection(&spec.labels());
        let query = AggregationAssembler::new(self.dialect.as_ref()).build_stats()?;

        let result = self.execute(&query, ctx)?;
        Ok(mapper.map_one(&result)?)
    }

    /// Users ranked by post count, including users with no posts.
    pub fn top_users(&self, limit: i64, ctx: &ExecContext) -> SearchResult<Vec<RankedUser>> {
        let spec = top_users_spec();
        let mapper = ResultMapper::for_projection(&spec.labels());
        let query = AggregationAssembler::new(self.dialect.as_ref()).build_top_entities(limit)?;

        let result = self.execute(&query, ctx)?;
        let ranked = mapper.map(&result)?;
        tracing::debug!(rows = ranked.len(), "mapped top users");
        Ok(ranked)
    }

    fn execute(&self, query: &CompiledQuery, ctx: &ExecContext) -> Result<QueryResult, ExecutionError> {
        tracing::debug!(
            backend = self.backend.backend_name(),
            sql = %query.text,
            args = query.param_count(),
            "executing query"
        );
        self.backend.execute_query(query, ctx)
    }
}
