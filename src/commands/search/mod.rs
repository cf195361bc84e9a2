mod execute;
mod output;

pub use execute::PostsResult;

use clap::Args;

use crate::queries::filter::DEFAULT_LIMIT;

/// Search posts by text, author, publication state and length
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  post_search search -q golang                     # Title or content contains 'golang'
  post_search search --user-id 1 --published true  # Published posts by user 1
  post_search search --min-words 100               # Posts with at least 100 words
  post_search search --order-by created_at --order-dir desc --limit 10")]
pub struct SearchCmd {
    /// Case-insensitive substring matched against title and content
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only posts written by this user
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Only published (true) or unpublished (false) posts
    #[arg(long)]
    pub published: Option<bool>,

    /// Minimum approximate word count of the content
    #[arg(long)]
    pub min_words: Option<i64>,

    /// Field to order by (id, title, created_at, updated_at)
    #[arg(long)]
    pub order_by: Option<String>,

    /// Order direction; "desc" sorts descending, anything else ascending
    #[arg(long, default_value = "asc")]
    pub order_dir: String,

    /// Maximum number of results to return (1-1000)
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(i64).range(1..=1000))]
    pub limit: i64,

    /// Number of results to skip
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub offset: i64,
}
