//! Execute tests for users command.

#[cfg(test)]
mod tests {
    use super::super::UsersCmd;
    use rstest::{fixture, rstest};

    crate::shared_fixture! {
        fixture_name: populated_db,
        fixture_type: blog,
    }

    fn names(result: &super::super::UsersResult) -> Vec<&str> {
        result.users.iter().map(|u| u.name.as_str()).collect()
    }

    // Names are returned in ascending order
    crate::execute_test! {
        test_name: test_users_all,
        fixture: populated_db,
        cmd: UsersCmd { query: None, limit: 50 },
        assertions: |result| {
            assert_eq!(
                names(&result),
                vec!["Alice Smith", "Bob Jones", "Carol White", "Dave Quiet"]
            );
        },
    }

    crate::execute_test! {
        test_name: test_users_name_match_any_case,
        fixture: populated_db,
        cmd: UsersCmd { query: Some("A".to_string()), limit: 50 },
        assertions: |result| {
            assert_eq!(names(&result), vec!["Alice Smith", "Carol White", "Dave Quiet"]);
        },
    }

    crate::execute_test! {
        test_name: test_users_limit,
        fixture: populated_db,
        cmd: UsersCmd { query: None, limit: 2 },
        assertions: |result| {
            assert_eq!(names(&result), vec!["Alice Smith", "Bob Jones"]);
        },
    }

    crate::execute_no_match_test! {
        test_name: test_users_no_match,
        fixture: populated_db,
        cmd: UsersCmd { query: Some("zed".to_string()), limit: 50 },
        empty_field: users,
    }

    crate::execute_empty_db_test! {
        cmd_type: UsersCmd,
        cmd: UsersCmd { query: None, limit: 50 },
    }
}
