//! Output formatting for stats command results.

use super::execute::StatsResult;
use crate::output::Outputable;

impl Outputable for StatsResult {
    fn to_table(&self) -> String {
        let s = &self.stats;
        [
            "Post statistics".to_string(),
            String::new(),
            format!("  Total posts:        {}", s.total_posts),
            format!("  Published posts:    {}", s.published_posts),
            format!("  Active authors:     {}", s.active_users),
            format!("  Avg content length: {:.2}", s.avg_content_length),
        ]
        .join("\n")
    }
}
