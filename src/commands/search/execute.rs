use std::error::Error;

use serde::Serialize;

use super::SearchCmd;
use crate::commands::Execute;
use crate::db::ExecContext;
use crate::queries::{FilterSpec, SearchService, SortDirection};
use crate::types::Post;

/// Result of the search command execution
#[derive(Debug, Default, Serialize)]
pub struct PostsResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub offset: i64,
    pub posts: Vec<Post>,
}

impl SearchCmd {
    /// Translate CLI options into search criteria.
    pub fn to_filter(&self) -> FilterSpec {
        let mut spec = FilterSpec::new()
            .equals("user_id", self.user_id)
            .equals("published", self.published)
            .limit(self.limit)
            .offset(self.offset);

        if let Some(term) = &self.query {
            spec = spec.text(term.as_str());
        }
        if let Some(min) = self.min_words {
            spec = spec.at_least("word_count", min);
        }
        if let Some(field) = &self.order_by {
            spec = spec.order_by(field.as_str(), SortDirection::parse_lenient(&self.order_dir));
        }
        spec
    }
}

impl Execute for SearchCmd {
    type Output = PostsResult;

    fn execute(self, service: &SearchService, ctx: &ExecContext) -> Result<Self::Output, Box<dyn Error>> {
        let posts = service.search_posts(&self.to_filter(), ctx)?;
        Ok(PostsResult {
            query: self.query,
            offset: self.offset,
            posts,
        })
    }
}
