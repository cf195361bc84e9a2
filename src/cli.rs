//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use std::time::Duration;

use clap::Parser;

use crate::commands::Command;
use crate::db::ExecContext;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database URL or SQLite path (overrides .post_search.json and DATABASE_URL)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Abort the query if it runs longer than this many milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Execution context for the command, carrying the timeout if one was given.
    pub fn exec_context(&self) -> ExecContext {
        match self.timeout_ms {
            Some(ms) => ExecContext::new().with_timeout(Duration::from_millis(ms)),
            None => ExecContext::new(),
        }
    }
}
