use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

pub const DEFAULT_ACCOUNT_SIZE: f64 = 100_000.0;
pub const DEFAULT_PROFIT_TARGET_PERCENTAGE: f64 = 6.0;
pub const DEFAULT_CONSISTENCY_RULE_PERCENTAGE: f64 = 35.0;

/// Prop-firm challenge parameters a daily P&L series is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeConfig {
    pub account_size: f64,
    pub profit_target_percentage: f64,
    pub consistency_rule_percentage: f64,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            account_size: DEFAULT_ACCOUNT_SIZE,
            profit_target_percentage: DEFAULT_PROFIT_TARGET_PERCENTAGE,
            consistency_rule_percentage: DEFAULT_CONSISTENCY_RULE_PERCENTAGE,
        }
    }
}

impl ChallengeConfig {
    /// Create a validated configuration
    pub fn new(
        account_size: f64,
        profit_target_percentage: f64,
        consistency_rule_percentage: f64,
    ) -> Result<Self, DomainError> {
        let config = Self {
            account_size,
            profit_target_percentage,
            consistency_rule_percentage,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse raw form text into a validated configuration
    pub fn from_raw(
        account_size: &str,
        profit_target_percentage: &str,
        consistency_rule_percentage: &str,
    ) -> Result<Self, DomainError> {
        Self::new(
            parse_field("Account size", account_size)?,
            parse_field("Profit target percentage", profit_target_percentage)?,
            parse_field("Consistency rule percentage", consistency_rule_percentage)?,
        )
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.account_size.is_finite() || self.account_size <= 0.0 {
            return Err(DomainError::InvalidConfiguration(format!(
                "Account size must be a positive number, got {}",
                self.account_size
            )));
        }
        if !self.profit_target_percentage.is_finite() || self.profit_target_percentage < 0.0 {
            return Err(DomainError::InvalidConfiguration(format!(
                "Profit target percentage cannot be negative, got {}",
                self.profit_target_percentage
            )));
        }
        if !self.consistency_rule_percentage.is_finite() || self.consistency_rule_percentage < 0.0
        {
            return Err(DomainError::InvalidConfiguration(format!(
                "Consistency rule percentage cannot be negative, got {}",
                self.consistency_rule_percentage
            )));
        }
        Ok(())
    }

    /// Total profit required to pass, in account currency
    pub fn profit_target(&self) -> f64 {
        self.account_size * self.profit_target_percentage / 100.0
    }
}

fn parse_field(name: &str, raw: &str) -> Result<f64, DomainError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            DomainError::InvalidConfiguration(format!("{} must be a number, got '{}'", name, raw))
        })
}
