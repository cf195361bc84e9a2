//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs`: turns the parsed command into a `SearchService` call
//! - `output.rs`: table formatting for the command's result

pub mod categories;
pub mod search;
pub mod stats;
pub mod top_users;
pub mod users;

pub use categories::CategoriesCmd;
pub use search::SearchCmd;
pub use stats::StatsCmd;
pub use top_users::TopUsersCmd;
pub use users::UsersCmd;

use clap::Subcommand;
use std::error::Error;

use crate::db::ExecContext;
use crate::output::{OutputFormat, Outputable};
use crate::queries::SearchService;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, service: &SearchService, ctx: &ExecContext) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search posts by text, author, publication state and length
    Search(SearchCmd),

    /// Search users by name
    Users(UsersCmd),

    /// Search categories by name
    Categories(CategoriesCmd),

    /// Show post statistics across all authors
    Stats(StatsCmd),

    /// Rank users by number of posts
    TopUsers(TopUsersCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(
        self,
        service: &SearchService,
        ctx: &ExecContext,
        format: OutputFormat,
    ) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Search(cmd) => Ok(cmd.execute(service, ctx)?.format(format)),
            Command::Users(cmd) => Ok(cmd.execute(service, ctx)?.format(format)),
            Command::Categories(cmd) => Ok(cmd.execute(service, ctx)?.format(format)),
            Command::Stats(cmd) => Ok(cmd.execute(service, ctx)?.format(format)),
            Command::TopUsers(cmd) => Ok(cmd.execute(service, ctx)?.format(format)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::blog_db;
    use rstest::rstest;

    #[rstest]
    fn test_run_formats_stats_as_json() {
        let db = blog_db();
        let service = SearchService::new(&db).unwrap();
        let output = Command::Stats(StatsCmd {})
            .run(&service, &ExecContext::new(), OutputFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["total_posts"], 6);
    }
}
