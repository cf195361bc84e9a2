use std::error::Error;

use serde::Serialize;

use super::CategoriesCmd;
use crate::commands::Execute;
use crate::db::ExecContext;
use crate::queries::SearchService;
use crate::types::Category;

/// Result of the categories command execution
#[derive(Debug, Default, Serialize)]
pub struct CategoriesResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub categories: Vec<Category>,
}

impl Execute for CategoriesCmd {
    type Output = CategoriesResult;

    fn execute(self, service: &SearchService, ctx: &ExecContext) -> Result<Self::Output, Box<dyn Error>> {
        let term = self.query.as_deref().unwrap_or_default();
        let categories = service.search_categories(term, self.limit, ctx)?;
        Ok(CategoriesResult {
            query: self.query,
            categories,
        })
    }
}
