mod execute;
mod execute_tests;
mod output;
mod output_tests;

pub use execute::TopUsersResult;

use clap::Args;

/// Rank users by number of posts
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  post_search top-users            # Ten most active authors
  post_search top-users -l 3       # Top three")]
pub struct TopUsersCmd {
    /// Maximum number of users to return (1-1000)
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..=1000))]
    pub limit: i64,
}
