use tracing::debug;

use super::{CalculationResult, EquityPoint};
use crate::challenge::ChallengeConfig;
use crate::entry::DailyEntry;
use crate::shared::DomainError;

/// Evaluates a daily P&L series against the profit target and the
/// consistency rule
///
/// Stateless and deterministic: the same input always yields a
/// bit-identical result, which keeps reloaded sessions reproducible.
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    pub fn evaluate(
        config: &ChallengeConfig,
        entries: &[DailyEntry],
    ) -> Result<CalculationResult, DomainError> {
        config.validate()?;

        let valid: Vec<(u32, f64)> = entries
            .iter()
            .filter_map(|entry| entry.profit.map(|profit| (entry.day, profit)))
            .collect();

        if let Some((day, profit)) = valid.iter().find(|(_, profit)| !profit.is_finite()) {
            return Err(DomainError::InvalidInput(format!(
                "Day {} has a non-finite profit: {}",
                day, profit
            )));
        }

        let Some(&first) = valid.first() else {
            return Err(DomainError::EmptyInput(
                "Please enter at least one daily profit value".to_string(),
            ));
        };

        let total_profit = valid.iter().fold(0.0, |sum, (_, profit)| sum + profit);

        // Strict comparison keeps the first of several equal maxima
        let (biggest_profit_day, biggest_profit_amount) =
            valid[1..].iter().fold(first, |max, &candidate| {
                if candidate.1 > max.1 {
                    candidate
                } else {
                    max
                }
            });

        let biggest_day_percentage = if total_profit > 0.0 {
            biggest_profit_amount / total_profit * 100.0
        } else {
            0.0
        };

        let profit_target = config.profit_target();
        let passed_profit_target = total_profit >= profit_target;
        let passed_consistency_rule = biggest_day_percentage <= config.consistency_rule_percentage;

        let mut running_equity = config.account_size;
        let equity_curve = valid
            .iter()
            .map(|&(day, profit)| {
                running_equity += profit;
                EquityPoint {
                    day,
                    equity: running_equity,
                }
            })
            .collect();

        debug!(
            days = valid.len(),
            total_profit,
            biggest_profit_day,
            biggest_day_percentage,
            passed_profit_target,
            passed_consistency_rule,
            "Evaluated trading days"
        );

        Ok(CalculationResult {
            total_profit,
            biggest_profit_day,
            biggest_profit_amount,
            biggest_day_percentage,
            passed_consistency_rule,
            equity_curve,
            profit_target,
            passed_profit_target,
        })
    }
}
