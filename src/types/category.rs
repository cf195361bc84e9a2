//! Category records.

use serde::Serialize;

use crate::db::schema::{EntitySchema, CATEGORIES};
use crate::error::MappingError;
use crate::queries::mapper::{FromRow, Record, RowReader};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Hex color code, e.g. "#007bff"
    pub color: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl FromRow for Category {
    fn from_row(row: &RowReader<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            id: row.int("id")?,
            name: row.text("name")?,
            description: row.text("description")?,
            color: row.text("color")?,
            active: row.bool("active")?,
            created_at: row.text("created_at")?,
            updated_at: row.text("updated_at")?,
        })
    }
}

impl Record for Category {
    const SCHEMA: &'static EntitySchema = &CATEGORIES;
}
