//! Output formatting tests for stats command.

#[cfg(test)]
mod tests {
    use super::super::execute::StatsResult;
    use crate::types::PostStats;
    use rstest::{fixture, rstest};

    const STATS_TABLE: &str = "\
Post statistics

  Total posts:        6
  Published posts:    4
  Active authors:     3
  Avg content length: 24.17";

    const STATS_JSON: &str = r#"{
  "total_posts": 6,
  "published_posts": 4,
  "active_users": 3,
  "avg_content_length": 24.5
}"#;

    #[fixture]
    fn stats_result() -> StatsResult {
        StatsResult {
            stats: PostStats {
                total_posts: 6,
                published_posts: 4,
                active_users: 3,
                avg_content_length: 145.0 / 6.0,
            },
        }
    }

    #[fixture]
    fn round_result() -> StatsResult {
        StatsResult {
            stats: PostStats {
                total_posts: 6,
                published_posts: 4,
                active_users: 3,
                avg_content_length: 24.5,
            },
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: stats_result,
        fixture_type: StatsResult,
        expected: STATS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_format_json_is_flat,
        fixture: round_result,
        fixture_type: StatsResult,
        expected: STATS_JSON,
        format: Json,
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: round_result,
        fixture_type: StatsResult,
        contains: ["total_posts", "active_users"],
    }
}
