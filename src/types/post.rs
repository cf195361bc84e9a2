//! Post records.

use serde::Serialize;

use crate::db::schema::{EntitySchema, POSTS};
use crate::error::MappingError;
use crate::queries::mapper::{FromRow, Record, RowReader};

/// A blog post as projected by a posts search.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl FromRow for Post {
    fn from_row(row: &RowReader<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            id: row.int("id")?,
            user_id: row.int("user_id")?,
            title: row.text("title")?,
            content: row.text("content")?,
            published: row.bool("published")?,
            created_at: row.text("created_at")?,
            updated_at: row.text("updated_at")?,
        })
    }
}

impl Record for Post {
    const SCHEMA: &'static EntitySchema = &POSTS;
}
