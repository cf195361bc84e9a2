mod execute;
mod output;
mod output_tests;

pub use execute::StatsResult;

use clap::Args;

/// Show post statistics across all authors
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  post_search stats                 # Totals as a table
  post_search --format json stats   # Same, as JSON")]
pub struct StatsCmd {}
