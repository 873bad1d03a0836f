//! Coaching data derived from an evaluated P&L series.
//!
//! These figures back the recommendations shown when the consistency
//! rule fails and the profit distribution chart. Nothing here affects
//! the pass/fail verdicts.

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeConfig;
use crate::entry::DailyEntry;
use crate::evaluation::CalculationResult;

const VOLATILE_DAY_FACTOR: f64 = 1.5;
const INCONSISTENT_DAY_FACTOR: f64 = 0.8;
const MAX_INCONSISTENT_DAYS: usize = 3;
const RECOMMENDED_RISK_RATIO: f64 = 0.015;
const MAX_RISK_RATIO: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayProfit {
    pub day: u32,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingInsights {
    pub profitable_days: usize,
    /// Total profit spread over the profitable days; `None` without any
    pub average_profit: Option<f64>,
    /// Days that made well above the average
    pub volatile_days: Vec<DayProfit>,
    /// Winning days noticeably below the average (at most three)
    pub inconsistent_days: Vec<DayProfit>,
    pub recommended_risk_per_trade: f64,
    pub max_risk_per_trade: f64,
    pub suggested_risk_reward: String,
    /// Largest single-day profit the rule allows for the current total
    pub max_biggest_day_amount: f64,
}

impl TradingInsights {
    pub fn analyze(
        config: &ChallengeConfig,
        entries: &[DailyEntry],
        result: &CalculationResult,
    ) -> Self {
        let days: Vec<DayProfit> = entered_days(entries).collect();
        let profitable_days = days.iter().filter(|d| d.profit > 0.0).count();

        let average_profit =
            (profitable_days > 0).then(|| result.total_profit / profitable_days as f64);

        let (volatile_days, inconsistent_days, suggested_risk_reward) = match average_profit {
            Some(average) => {
                let volatile = days
                    .iter()
                    .filter(|d| d.profit > average * VOLATILE_DAY_FACTOR)
                    .copied()
                    .collect();
                let inconsistent = days
                    .iter()
                    .filter(|d| d.profit > 0.0 && d.profit < average * INCONSISTENT_DAY_FACTOR)
                    .take(MAX_INCONSISTENT_DAYS)
                    .copied()
                    .collect();
                let rr = if result.biggest_profit_amount > average * 2.0 {
                    "1:1.2"
                } else {
                    "1:1.5"
                };
                (volatile, inconsistent, rr)
            }
            None => (Vec::new(), Vec::new(), "1:1.5"),
        };

        Self {
            profitable_days,
            average_profit,
            volatile_days,
            inconsistent_days,
            recommended_risk_per_trade: (config.account_size * RECOMMENDED_RISK_RATIO).round(),
            max_risk_per_trade: (config.account_size * MAX_RISK_RATIO).round(),
            suggested_risk_reward: suggested_risk_reward.to_string(),
            max_biggest_day_amount: result.total_profit
                * (config.consistency_rule_percentage / 100.0),
        }
    }
}

/// One slice of the profit distribution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitShare {
    pub day: u32,
    pub profit: f64,
    /// Share of the sum of winning days, not of net profit
    pub percentage: f64,
    /// Set on the biggest day when it broke the consistency rule
    pub violates_rule: bool,
}

impl ProfitShare {
    pub fn distribution(entries: &[DailyEntry], result: &CalculationResult) -> Vec<Self> {
        let winners: Vec<DayProfit> = entered_days(entries).filter(|d| d.profit > 0.0).collect();
        let gross: f64 = winners.iter().fold(0.0, |sum, d| sum + d.profit);

        winners
            .into_iter()
            .map(|d| Self {
                day: d.day,
                profit: d.profit,
                percentage: if gross > 0.0 {
                    d.profit / gross * 100.0
                } else {
                    0.0
                },
                violates_rule: d.day == result.biggest_profit_day
                    && !result.passed_consistency_rule,
            })
            .collect()
    }
}

fn entered_days(entries: &[DailyEntry]) -> impl Iterator<Item = DayProfit> + '_ {
    entries.iter().filter_map(|entry| {
        entry.profit.map(|profit| DayProfit {
            day: entry.day,
            profit,
        })
    })
}
