//! Searchable entity definitions.
//!
//! These are the only tables and columns the search pipeline will ever name
//! in SQL text.

use super::definition::{DataType, EntitySchema, FieldExpr, FieldUsage, SchemaField};

const EQ_ORDER: &[FieldUsage] = &[FieldUsage::Equality, FieldUsage::Order];
const EQ: &[FieldUsage] = &[FieldUsage::Equality];
const ORDER: &[FieldUsage] = &[FieldUsage::Order];
const THRESHOLD: &[FieldUsage] = &[FieldUsage::Threshold];

// ============================================================================
// posts
// ============================================================================

pub const POST_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "title",
    "content",
    "published",
    "created_at",
    "updated_at",
];

const POST_FIELDS: &[SchemaField] = &[
    SchemaField {
        name: "id",
        expr: FieldExpr::Column("id"),
        data_type: DataType::Int,
        usages: ORDER,
    },
    SchemaField {
        name: "user_id",
        expr: FieldExpr::Column("user_id"),
        data_type: DataType::Int,
        usages: EQ,
    },
    SchemaField {
        name: "published",
        expr: FieldExpr::Column("published"),
        data_type: DataType::Bool,
        usages: EQ,
    },
    SchemaField {
        name: "title",
        expr: FieldExpr::Column("title"),
        data_type: DataType::Text,
        usages: ORDER,
    },
    SchemaField {
        name: "created_at",
        expr: FieldExpr::Column("created_at"),
        data_type: DataType::Timestamp,
        usages: ORDER,
    },
    SchemaField {
        name: "updated_at",
        expr: FieldExpr::Column("updated_at"),
        data_type: DataType::Timestamp,
        usages: ORDER,
    },
    SchemaField {
        name: "word_count",
        expr: FieldExpr::WordCount("content"),
        data_type: DataType::Int,
        usages: THRESHOLD,
    },
];

pub const POSTS: EntitySchema = EntitySchema {
    entity: "posts",
    table: "posts",
    projection: POST_COLUMNS,
    text_columns: &["title", "content"],
    fields: POST_FIELDS,
    scope: None,
};

// ============================================================================
// users
// ============================================================================

pub const USER_COLUMNS: &[&str] = &["id", "name", "email", "created_at", "updated_at"];

const USER_FIELDS: &[SchemaField] = &[
    SchemaField {
        name: "id",
        expr: FieldExpr::Column("id"),
        data_type: DataType::Int,
        usages: EQ_ORDER,
    },
    SchemaField {
        name: "email",
        expr: FieldExpr::Column("email"),
        data_type: DataType::Text,
        usages: EQ_ORDER,
    },
    SchemaField {
        name: "name",
        expr: FieldExpr::Column("name"),
        data_type: DataType::Text,
        usages: ORDER,
    },
    SchemaField {
        name: "created_at",
        expr: FieldExpr::Column("created_at"),
        data_type: DataType::Timestamp,
        usages: ORDER,
    },
];

pub const USERS: EntitySchema = EntitySchema {
    entity: "users",
    table: "users",
    projection: USER_COLUMNS,
    text_columns: &["name"],
    fields: USER_FIELDS,
    scope: None,
};

// ============================================================================
// categories
// ============================================================================

pub const CATEGORY_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "color",
    "active",
    "created_at",
    "updated_at",
];

const CATEGORY_FIELDS: &[SchemaField] = &[
    SchemaField {
        name: "id",
        expr: FieldExpr::Column("id"),
        data_type: DataType::Int,
        usages: EQ_ORDER,
    },
    SchemaField {
        name: "name",
        expr: FieldExpr::Column("name"),
        data_type: DataType::Text,
        usages: ORDER,
    },
    SchemaField {
        name: "active",
        expr: FieldExpr::Column("active"),
        data_type: DataType::Bool,
        usages: EQ,
    },
    SchemaField {
        name: "created_at",
        expr: FieldExpr::Column("created_at"),
        data_type: DataType::Timestamp,
        usages: ORDER,
    },
];

/// Soft-deleted categories keep their row with `deleted_at` set.
pub const CATEGORIES: EntitySchema = EntitySchema {
    entity: "categories",
    table: "categories",
    projection: CATEGORY_COLUMNS,
    text_columns: &["name"],
    fields: CATEGORY_FIELDS,
    scope: Some("deleted_at IS NULL"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&POSTS)]
    #[case(&USERS)]
    #[case(&CATEGORIES)]
    fn test_field_names_unique(#[case] schema: &EntitySchema) {
        let mut names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), schema.fields.len());
    }

    #[rstest]
    #[case(&POSTS)]
    #[case(&USERS)]
    #[case(&CATEGORIES)]
    fn test_text_columns_are_projected(#[case] schema: &EntitySchema) {
        for col in schema.text_columns {
            assert!(schema.projection.contains(col), "{} not projected", col);
        }
    }

    #[rstest]
    fn test_word_count_is_threshold_only() {
        let field = POSTS.field("word_count").unwrap();
        assert!(field.allows(FieldUsage::Threshold));
        assert!(!field.allows(FieldUsage::Equality));
        assert!(!field.allows(FieldUsage::Order));
    }

    #[rstest]
    fn test_soft_deleted_column_is_never_projected() {
        assert!(!CATEGORIES.projection.contains(&"deleted_at"));
        assert!(CATEGORIES.field("deleted_at").is_none());
        assert_eq!(CATEGORIES.scope, Some("deleted_at IS NULL"));
    }
}
