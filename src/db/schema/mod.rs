//! Searchable entity schema definitions.
//!
//! The schema system consists of two parts:
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `EntitySchema` - a table, its projection, free-text columns and field allow-list
//!    - `SchemaField` - a caller-visible field name bound to a SQL expression
//!    - `FieldExpr` - plain column or derived expression (approximate word count)
//!    - `FieldUsage` - equality, threshold or ordering permission
//!
//! 2. **Entity Definitions** (`relations.rs`):
//!    - `POSTS`, `USERS`, `CATEGORIES`
//!
//! Schema creation itself belongs to the deployment, not to this crate.

mod definition;
mod relations;

pub use definition::{DataType, EntitySchema, FieldExpr, FieldUsage, SchemaField};
pub use relations::{CATEGORIES, CATEGORY_COLUMNS, POST_COLUMNS, POSTS, USER_COLUMNS, USERS};
