mod evaluator;


use serde::{Deserialize, Serialize};

pub use evaluator::ConsistencyEvaluator;

/// Account balance after a given trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub day: u32,
    pub equity: f64,
}

/// Outcome of evaluating one P&L series against a challenge
///
/// Field names follow the persisted history layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_profit: f64,
    pub biggest_profit_day: u32,
    pub biggest_profit_amount: f64,
    /// 0 whenever total profit is zero or negative
    pub biggest_day_percentage: f64,
    pub passed_consistency_rule: bool,
    pub equity_curve: Vec<EquityPoint>,
    pub profit_target: f64,
    pub passed_profit_target: bool,
}

impl CalculationResult {
    /// Total profit as a percentage of the starting balance
    pub fn return_on_account(&self, account_size: f64) -> f64 {
        if account_size > 0.0 {
            self.total_profit / account_size * 100.0
        } else {
            0.0
        }
    }

    /// Both challenge rules satisfied
    pub fn passed(&self) -> bool {
        self.passed_profit_target && self.passed_consistency_rule
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.equity_curve.last().map(|point| point.equity)
    }
}
