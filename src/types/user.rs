//! User records: plain search results and activity rankings.

use serde::Serialize;

use crate::db::schema::{EntitySchema, USERS};
use crate::error::MappingError;
use crate::queries::mapper::{FromRow, Record, RowReader};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl FromRow for User {
    fn from_row(row: &RowReader<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            id: row.int("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            created_at: row.text("created_at")?,
            updated_at: row.text("updated_at")?,
        })
    }
}

impl Record for User {
    const SCHEMA: &'static EntitySchema = &USERS;
}

/// A user with post activity counts.
///
/// Users without posts still appear, with zero counts and no last post date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub post_count: i64,
    pub published_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_post_date: Option<String>,
}

impl FromRow for RankedUser {
    fn from_row(row: &RowReader<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            id: row.int("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            post_count: row.int("post_count")?,
            published_count: row.int("published_count")?,
            last_post_date: row.opt_text("last_post_date")?,
        })
    }
}
