//! Output formatting for search command results.

use super::execute::PostsResult;
use crate::output::{truncate, Outputable};

const CONTENT_PREVIEW: usize = 60;

impl Outputable for PostsResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        match &self.query {
            Some(q) => lines.push(format!("Posts matching: {}", q)),
            None => lines.push("Posts".to_string()),
        }
        lines.push(String::new());

        if self.posts.is_empty() {
            lines.push("No posts found.".to_string());
            return lines.join("\n");
        }

        if self.offset > 0 {
            lines.push(format!("Showing {} (offset {}):", self.posts.len(), self.offset));
        } else {
            lines.push(format!("Showing {}:", self.posts.len()));
        }

        for post in &self.posts {
            let state = if post.published { "published" } else { "draft" };
            lines.push(format!(
                "  [{}] {} (user {}, {}, {})",
                post.id, post.title, post.user_id, state, post.created_at
            ));
            lines.push(format!("      {}", truncate(&post.content, CONTENT_PREVIEW)));
        }

        lines.join("\n")
    }
}
