//! Aggregate post statistics.

use serde::Serialize;

use crate::error::MappingError;
use crate::queries::mapper::{FromRow, RowReader};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostStats {
    pub total_posts: i64,
    pub published_posts: i64,
    pub active_users: i64,
    /// Mean content length in characters, `0.0` when there are no posts.
    pub avg_content_length: f64,
}

impl FromRow for PostStats {
    fn from_row(row: &RowReader<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            total_posts: row.int("total_posts")?,
            published_posts: row.int("published_posts")?,
            active_users: row.int("active_users")?,
            avg_content_length: row.float_or_zero("avg_content_length")?,
        })
    }
}
