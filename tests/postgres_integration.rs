//! Integration tests against a live PostgreSQL store.
//!
//! Run with: cargo test --features postgres-tests
//!
//! Prerequisites:
//! 1. A reachable PostgreSQL instance
//! 2. `DATABASE_URL` pointing at a database the tests may create schemas in,
//!    e.g. `postgres://postgres@localhost/post_search_test`

#![cfg(feature = "postgres-tests")]

use std::error::Error;
use std::time::Duration;

use post_search::db::{DatabaseBackend, ExecContext, PostgresBackend, PostgresConfig};
use post_search::error::{ExecutionError, MappingError, SearchError};
use post_search::queries::builder::CompiledQuery;
use post_search::queries::{FilterSpec, SearchService, SortDirection};

const SCHEMA: &str = include_str!("../src/fixtures/postgres_schema.sql");
const SEED: &str = include_str!("../src/fixtures/blog_seed.sql");

/// Connect and load the blog fixture into a schema private to one test.
fn blog_store(schema: &str) -> Result<PostgresBackend, Box<dyn Error>> {
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/post_search_test".to_string());
    let backend = PostgresBackend::connect(&PostgresConfig::from_connection_string(&url))?;

    backend.execute_batch(&format!(
        "DROP SCHEMA IF EXISTS {schema} CASCADE; CREATE SCHEMA {schema}; SET search_path TO {schema};"
    ))?;
    backend.execute_batch(SCHEMA)?;
    backend.execute_batch(SEED)?;
    Ok(backend)
}

fn sorted(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort();
    ids
}

#[test]
fn test_postgres_text_search_is_case_insensitive() {
    let store = blog_store("ps_text").expect("postgres fixture should load");
    let service = SearchService::new(&store).unwrap();

    let posts = service
        .search_posts(&FilterSpec::new().text("golang"), &ExecContext::new())
        .unwrap();
    assert_eq!(sorted(posts.iter().map(|p| p.id).collect()), vec![1, 4, 5]);
}

#[test]
fn test_postgres_filters_and_threshold() {
    let store = blog_store("ps_filters").expect("postgres fixture should load");
    let service = SearchService::new(&store).unwrap();

    let spec = FilterSpec::new()
        .equals("published", true)
        .at_least("word_count", 4i64)
        .order_by("created_at", SortDirection::Desc);
    let ids: Vec<i64> = service
        .search_posts(&spec, &ExecContext::new())
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![6, 1]);
}

#[test]
fn test_postgres_aggregates_match_sqlite_facts() {
    let store = blog_store("ps_aggregates").expect("postgres fixture should load");
    let service = SearchService::new(&store).unwrap();
    let ctx = ExecContext::new();

    let stats = service.stats(&ctx).unwrap();
    assert_eq!(stats.total_posts, 6);
    assert_eq!(stats.published_posts, 4);
    assert_eq!(stats.active_users, 3);
    assert!((stats.avg_content_length - 145.0 / 6.0).abs() < 1e-9);

    let ranked = service.top_users(10, &ctx).unwrap();
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].last_post_date.as_deref(), Some("2024-01-03 10:00:00"));
    assert!(ranked[3].last_post_date.is_none());
}

#[test]
fn test_postgres_expired_deadline() {
    let store = blog_store("ps_timeout").expect("postgres fixture should load");
    let service = SearchService::new(&store).unwrap();

    let ctx = ExecContext::new().with_timeout(Duration::from_millis(0));
    std::thread::sleep(Duration::from_millis(5));
    let err = service.stats(&ctx).unwrap_err();
    assert_eq!(err, SearchError::Execution(ExecutionError::DeadlineExceeded));
}

#[test]
fn test_postgres_categories_skip_soft_deleted() {
    let store = blog_store("ps_categories").expect("postgres fixture should load");
    let service = SearchService::new(&store).unwrap();

    let ids: Vec<i64> = service
        .search_categories("GOLANG", 50, &ExecContext::new())
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_postgres_unsupported_cell_type() {
    let store = blog_store("ps_bytea").expect("postgres fixture should load");
    let query = CompiledQuery {
        text: "SELECT '\\x00ff'::bytea AS data".to_string(),
        arguments: vec![],
    };

    let err = store.execute_query(&query, &ExecContext::new()).unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::Undecodable(MappingError::Undecodable { ref column, .. }) if column == "data"
    ));
}
