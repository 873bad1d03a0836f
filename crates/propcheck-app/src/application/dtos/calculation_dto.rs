use serde::{Deserialize, Serialize};

use propcheck_domain::evaluation::CalculationResult;
use propcheck_domain::insights::{ProfitShare, TradingInsights};
use propcheck_domain::shared::DomainError;

/// Persistence problem reported next to an otherwise successful result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningDto {
    pub code: u16,
    pub message: String,
}

impl From<&DomainError> for WarningDto {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationOutcomeDto {
    pub result: CalculationResult,
    /// Return on the account, in percent
    pub return_percentage: f64,
    pub distribution: Vec<ProfitShare>,
    /// Only present when the consistency rule failed
    pub insights: Option<TradingInsights>,
    /// Id of the stored session, `None` when saving failed
    pub session_id: Option<String>,
    pub persistence_warning: Option<WarningDto>,
}
