//! Output formatting for users command results.

use super::execute::UsersResult;
use crate::output::Outputable;

impl Outputable for UsersResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        match &self.query {
            Some(q) => lines.push(format!("Users matching: {}", q)),
            None => lines.push("Users".to_string()),
        }
        lines.push(String::new());

        if self.users.is_empty() {
            lines.push("No users found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Found {}:", self.users.len()));
        for user in &self.users {
            lines.push(format!("  [{}] {} <{}>", user.id, user.name, user.email));
        }

        lines.join("\n")
    }
}
