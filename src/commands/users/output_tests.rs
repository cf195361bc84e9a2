//! Output formatting tests for users command.

#[cfg(test)]
mod tests {
    use super::super::execute::UsersResult;
    use crate::types::User;
    use rstest::{fixture, rstest};

    const EMPTY_TABLE: &str = "\
Users matching: zed

No users found.";

    const USERS_TABLE: &str = "\
Users

Found 2:
  [1] Alice Smith <alice@example.com>
  [2] Bob Jones <bob@example.com>";

    const USERS_JSON: &str = r#"{
  "users": [
    {
      "id": 1,
      "name": "Alice Smith",
      "email": "alice@example.com",
      "created_at": "2024-01-01 09:00:00",
      "updated_at": "2024-01-01 09:00:00"
    },
    {
      "id": 2,
      "name": "Bob Jones",
      "email": "bob@example.com",
      "created_at": "2024-01-01 09:00:00",
      "updated_at": "2024-01-01 09:00:00"
    }
  ]
}"#;

    fn user(id: i64, name: &str, email: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: "2024-01-01 09:00:00".to_string(),
            updated_at: "2024-01-01 09:00:00".to_string(),
        }
    }

    #[fixture]
    fn empty_result() -> UsersResult {
        UsersResult {
            query: Some("zed".to_string()),
            users: vec![],
        }
    }

    #[fixture]
    fn users_result() -> UsersResult {
        UsersResult {
            query: None,
            users: vec![
                user(1, "Alice Smith", "alice@example.com"),
                user(2, "Bob Jones", "bob@example.com"),
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: UsersResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_users,
        fixture: users_result,
        fixture_type: UsersResult,
        expected: USERS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_format_json,
        fixture: users_result,
        fixture_type: UsersResult,
        expected: USERS_JSON,
        format: Json,
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: users_result,
        fixture_type: UsersResult,
        contains: ["Alice Smith", "bob@example.com"],
    }
}
