//! post_search library - filtered search and activity statistics over a blog store
//!
//! Provides the safe query builder, the SQLite and PostgreSQL backends, typed
//! record decoding, and the command and output layer used by the CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod output;
pub mod queries;
pub mod types;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;
