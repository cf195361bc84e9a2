//! Query construction, execution and row decoding.
//!
//! # Components
//!
//! ## Criteria
//! - [`filter`] - `FilterSpec`: text term, equality filters, threshold, paging, ordering
//!
//! ## Building
//! - [`builder`] - clause tree, predicate builder, compiler, dialects, aggregation
//!
//! ## Decoding
//! - [`mapper`] - row layouts and typed record decoding
//!
//! ## Pipeline
//! - [`search`] - `SearchService`, the entry point used by commands
//!
//! # Safety
//!
//! Identifiers in SQL text come only from `EntitySchema` allow-lists; every
//! caller-supplied value is a bound argument.

pub mod builder;
pub mod filter;
pub mod mapper;
pub mod search;

pub use filter::{FilterSpec, SortDirection};
pub use search::SearchService;
