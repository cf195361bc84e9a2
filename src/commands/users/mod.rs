mod execute;
mod execute_tests;
mod output;
mod output_tests;

pub use execute::UsersResult;

use clap::Args;

use crate::queries::filter::DEFAULT_LIMIT;

/// Search users by name
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  post_search users               # All users, by name
  post_search users -q smith      # Names containing 'smith'
  post_search users -q a -l 5     # First five matches")]
pub struct UsersCmd {
    /// Case-insensitive substring matched against the user's name
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of results to return (1-1000)
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(i64).range(1..=1000))]
    pub limit: i64,
}
