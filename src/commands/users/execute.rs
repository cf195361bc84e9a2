use std::error::Error;

use serde::Serialize;

use super::UsersCmd;
use crate::commands::Execute;
use crate::db::ExecContext;
use crate::queries::SearchService;
use crate::types::User;

/// Result of the users command execution
#[derive(Debug, Default, Serialize)]
pub struct UsersResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub users: Vec<User>,
}

impl Execute for UsersCmd {
    type Output = UsersResult;

    fn execute(self, service: &SearchService, ctx: &ExecContext) -> Result<Self::Output, Box<dyn Error>> {
        // An empty term matches every user.
        let term = self.query.as_deref().unwrap_or_default();
        let users = service.search_users(term, self.limit, ctx)?;
        Ok(UsersResult {
            query: self.query,
            users,
        })
    }
}
