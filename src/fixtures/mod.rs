//! Test fixtures for execute tests.
//!
//! SQL fixtures are loaded at compile time using `include_str!`.
//!
//! ## Available Fixtures
//!
//! - [`SQLITE_SCHEMA`] / [`POSTGRES_SCHEMA`] - `users`, `posts` and `categories` tables
//! - [`BLOG_SEED`] - 4 users, 6 posts and 5 categories, valid for both stores
//!
//! ## Seed Data
//!
//! | user | posts | published | notes |
//! |------|-------|-----------|-------|
//! | 1 Alice Smith | 1, 2, 3 | 1, 2 | post 2 is `"a b c"`, post 3 is `"abcabc"` |
//! | 2 Bob Jones | 4, 5 | 4 | post 5 mentions GOLANG in content only |
//! | 3 Carol White | 6 | 6 | |
//! | 4 Dave Quiet | none | none | |
//!
//! "golang" matches posts 1, 4 and 5 case-insensitively. Content lengths sum
//! to 145 characters over 6 posts.
//!
//! Categories 1 Golang, 2 Rust, 3 Databases (inactive) and 4 Éditions are
//! live. 5 Legacy golang is soft-deleted and never returned.

pub const SQLITE_SCHEMA: &str = include_str!("sqlite_schema.sql");

pub const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

pub const BLOG_SEED: &str = include_str!("blog_seed.sql");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteBackend;
    use rstest::rstest;

    #[rstest]
    fn test_sqlite_fixture_loads() {
        let db = SqliteBackend::in_memory().unwrap();
        db.execute_batch(SQLITE_SCHEMA).unwrap();
        db.execute_batch(BLOG_SEED).unwrap();
    }

    #[rstest]
    fn test_postgres_schema_declares_both_tables() {
        assert!(POSTGRES_SCHEMA.contains("CREATE TABLE users"));
        assert!(POSTGRES_SCHEMA.contains("CREATE TABLE posts"));
        assert!(POSTGRES_SCHEMA.contains("CREATE TABLE categories"));
    }
}
