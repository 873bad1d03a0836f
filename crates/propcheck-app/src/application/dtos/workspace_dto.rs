use serde::{Deserialize, Serialize};

use propcheck_domain::challenge::ChallengeConfig;
use propcheck_domain::entry::DailyEntry;
use propcheck_domain::evaluation::CalculationResult;

/// Current calculator form state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceDto {
    pub config: ChallengeConfig,
    pub entries: Vec<DailyEntry>,
    pub results: Option<CalculationResult>,
}
