//! Helper utilities for query building.
//!
//! Common functions used across query builders to reduce boilerplate
//! and ensure consistent formatting.

use super::PLACEHOLDER;

/// Format a list of field names as a comma-separated string.
///
/// Used for SELECT and GROUP BY lists.
pub fn format_fields(fields: &[&str]) -> String {
    fields.join(", ")
}

/// Prefix a column with a table alias when one is given.
pub fn qualify(alias: Option<&str>, column: &str) -> String {
    match alias {
        Some(alias) => format!("{}.{}", alias, column),
        None => column.to_string(),
    }
}

/// Approximate word count of a text expression.
///
/// Counts single spaces plus one, so text without spaces counts as one word
/// and runs of spaces count extra words.
pub fn word_count_expr(column: &str) -> String {
    format!(
        "(LENGTH({col}) - LENGTH(REPLACE({col}, ' ', '')) + 1)",
        col = column
    )
}

/// Count placeholder markers outside single-quoted literals.
pub fn count_markers(text: &str) -> usize {
    let mut count = 0;
    let mut quoted = false;
    for c in text.chars() {
        match c {
            '\'' => quoted = !quoted,
            c if c == PLACEHOLDER && !quoted => count += 1,
            _ => {}
        }
    }
    count
}

/// Replace each marker outside single-quoted literals with the placeholder
/// produced for its 1-based position.
pub fn number_markers(text: &str, placeholder: impl Fn(usize) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut quoted = false;
    let mut index = 0;
    for c in text.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                out.push(c);
            }
            c if c == PLACEHOLDER && !quoted => {
                index += 1;
                out.push_str(&placeholder(index));
            }
            c => out.push(c),
        }
    }
    out
}
