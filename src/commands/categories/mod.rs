mod cli_tests;
mod execute;
mod output;

pub use execute::CategoriesResult;

use clap::Args;

use crate::queries::filter::DEFAULT_LIMIT;

/// Search categories by name
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  post_search categories            # All live categories, by name
  post_search categories -q go      # Names containing 'go'
  post_search categories -l 3       # First three categories")]
pub struct CategoriesCmd {
    /// Case-insensitive substring matched against the category name
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of results to return (1-1000)
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(i64).range(1..=1000))]
    pub limit: i64,
}
