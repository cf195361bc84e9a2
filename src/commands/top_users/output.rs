//! Output formatting for top-users command results.

use super::execute::TopUsersResult;
use crate::output::Outputable;

impl Outputable for TopUsersResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Top users (limit {})", self.limit), String::new()];

        if self.users.is_empty() {
            lines.push("No users found.".to_string());
            return lines.join("\n");
        }

        for (rank, user) in self.users.iter().enumerate() {
            let last = user.last_post_date.as_deref().unwrap_or("never");
            lines.push(format!(
                "  {}. {} <{}>: {} posts ({} published), last post {}",
                rank + 1,
                user.name,
                user.email,
                user.post_count,
                user.published_count,
                last
            ));
        }

        lines.join("\n")
    }
}
