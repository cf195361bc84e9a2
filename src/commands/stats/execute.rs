use std::error::Error;

use serde::Serialize;

use super::StatsCmd;
use crate::commands::Execute;
use crate::db::ExecContext;
use crate::queries::SearchService;
use crate::types::PostStats;

/// Result of the stats command execution
#[derive(Debug, Serialize)]
pub struct StatsResult {
    #[serde(flatten)]
    pub stats: PostStats,
}

impl Execute for StatsCmd {
    type Output = StatsResult;

    fn execute(self, service: &SearchService, ctx: &ExecContext) -> Result<Self::Output, Box<dyn Error>> {
        Ok(StatsResult {
            stats: service.stats(ctx)?,
        })
    }
}
