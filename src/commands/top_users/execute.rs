use std::error::Error;

use serde::Serialize;

use super::TopUsersCmd;
use crate::commands::Execute;
use crate::db::ExecContext;
use crate::queries::SearchService;
use crate::types::RankedUser;

/// Result of the top-users command execution
#[derive(Debug, Default, Serialize)]
pub struct TopUsersResult {
    pub limit: i64,
    pub users: Vec<RankedUser>,
}

impl Execute for TopUsersCmd {
    type Output = TopUsersResult;

    fn execute(self, service: &SearchService, ctx: &ExecContext) -> Result<Self::Output, Box<dyn Error>> {
        let users = service.top_users(self.limit, ctx)?;
        Ok(TopUsersResult {
            limit: self.limit,
            users,
        })
    }
}
