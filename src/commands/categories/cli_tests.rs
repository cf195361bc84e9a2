//! CLI parsing tests for categories command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_defaults_test! {
        command: "categories",
        variant: Categories,
        required_args: [],
        defaults: {
            query: None,
        },
    }

    crate::cli_option_test! {
        command: "categories",
        variant: Categories,
        test_name: test_categories_with_query,
        args: ["-q", "go"],
        field: query,
        expected: Some("go".to_string()),
    }

    crate::cli_limit_tests! {
        command: "categories",
        variant: Categories,
        required_args: [],
        limit: {
            field: limit,
            default: 50,
            max: 1000,
        },
    }
}
