use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use propcheck_domain::session::Session;

/// One row of the history list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub account_size: f64,
    pub profit_target_percentage: f64,
    pub consistency_rule_percentage: f64,
    pub days_entered: usize,
    pub total_profit: Option<f64>,
    pub return_percentage: Option<f64>,
    pub passed_profit_target: Option<bool>,
    pub passed_consistency_rule: Option<bool>,
}

impl From<&Session> for SessionSummaryDto {
    fn from(session: &Session) -> Self {
        let config = session.config();
        let results = session.results();

        Self {
            id: session.id().to_string(),
            timestamp: session.timestamp(),
            account_size: config.account_size,
            profit_target_percentage: config.profit_target_percentage,
            consistency_rule_percentage: config.consistency_rule_percentage,
            days_entered: session
                .daily_entries()
                .iter()
                .filter(|entry| entry.is_entered())
                .count(),
            total_profit: results.map(|r| r.total_profit),
            return_percentage: results.map(|r| r.return_on_account(config.account_size)),
            passed_profit_target: results.map(|r| r.passed_profit_target),
            passed_consistency_rule: results.map(|r| r.passed_consistency_rule),
        }
    }
}
