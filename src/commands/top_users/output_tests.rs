//! Output formatting tests for top-users command.

#[cfg(test)]
mod tests {
    use super::super::execute::TopUsersResult;
    use crate::types::RankedUser;
    use rstest::{fixture, rstest};

    const EMPTY_TABLE: &str = "\
Top users (limit 10)

No users found.";

    const RANKED_TABLE: &str = "\
Top users (limit 10)

  1. Alice Smith <alice@example.com>: 3 posts (2 published), last post 2024-01-03 10:00:00
  2. Dave Quiet <dave@example.com>: 0 posts (0 published), last post never";

    #[fixture]
    fn empty_result() -> TopUsersResult {
        TopUsersResult {
            limit: 10,
            users: vec![],
        }
    }

    #[fixture]
    fn ranked_result() -> TopUsersResult {
        TopUsersResult {
            limit: 10,
            users: vec![
                RankedUser {
                    id: 1,
                    name: "Alice Smith".to_string(),
                    email: "alice@example.com".to_string(),
                    post_count: 3,
                    published_count: 2,
                    last_post_date: Some("2024-01-03 10:00:00".to_string()),
                },
                RankedUser {
                    id: 4,
                    name: "Dave Quiet".to_string(),
                    email: "dave@example.com".to_string(),
                    post_count: 0,
                    published_count: 0,
                    last_post_date: None,
                },
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: TopUsersResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_ranked,
        fixture: ranked_result,
        fixture_type: TopUsersResult,
        expected: RANKED_TABLE,
    }

    #[rstest]
    fn test_format_json_omits_missing_last_post(ranked_result: TopUsersResult) {
        use crate::output::{OutputFormat, Outputable};
        let parsed: serde_json::Value =
            serde_json::from_str(&ranked_result.format(OutputFormat::Json)).unwrap();
        assert_eq!(parsed["users"][0]["last_post_date"], "2024-01-03 10:00:00");
        assert!(parsed["users"][1].get("last_post_date").is_none());
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: ranked_result,
        fixture_type: TopUsersResult,
        contains: ["Alice Smith", "Dave Quiet"],
    }
}
