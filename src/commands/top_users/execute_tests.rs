//! Execute tests for top-users command.

#[cfg(test)]
mod tests {
    use super::super::TopUsersCmd;
    use rstest::{fixture, rstest};

    crate::shared_fixture! {
        fixture_name: populated_db,
        fixture_type: blog,
    }

    // Alice 3, Bob 2, Carol 1, Dave 0
    crate::execute_test! {
        test_name: test_top_users_ranking,
        fixture: populated_db,
        cmd: TopUsersCmd { limit: 10 },
        assertions: |result| {
            let ranking: Vec<(&str, i64)> = result
                .users
                .iter()
                .map(|u| (u.name.as_str(), u.post_count))
                .collect();
            assert_eq!(
                ranking,
                vec![("Alice Smith", 3), ("Bob Jones", 2), ("Carol White", 1), ("Dave Quiet", 0)]
            );
        },
    }

    crate::execute_test! {
        test_name: test_top_users_counts_and_dates,
        fixture: populated_db,
        cmd: TopUsersCmd { limit: 10 },
        assertions: |result| {
            let alice = &result.users[0];
            assert_eq!(alice.published_count, 2);
            assert_eq!(alice.last_post_date.as_deref(), Some("2024-01-03 10:00:00"));
        },
    }

    crate::execute_test! {
        test_name: test_top_users_includes_user_without_posts,
        fixture: populated_db,
        cmd: TopUsersCmd { limit: 10 },
        assertions: |result| {
            let dave = result.users.iter().find(|u| u.name == "Dave Quiet").unwrap();
            assert_eq!(dave.post_count, 0);
            assert_eq!(dave.published_count, 0);
            assert!(dave.last_post_date.is_none());
        },
    }

    crate::execute_test! {
        test_name: test_top_users_limit,
        fixture: populated_db,
        cmd: TopUsersCmd { limit: 2 },
        assertions: |result| {
            assert_eq!(result.users.len(), 2);
            assert_eq!(result.users[1].name, "Bob Jones");
        },
    }

    #[rstest]
    fn test_top_users_zero_limit_rejected(populated_db: crate::db::SqliteBackend) {
        let result = crate::test_utils::execute_cmd(TopUsersCmd { limit: 0 }, &populated_db);
        assert!(result.is_err());
    }

    crate::execute_empty_db_test! {
        cmd_type: TopUsersCmd,
        cmd: TopUsersCmd { limit: 10 },
    }
}
