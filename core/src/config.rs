//! Validation policy.
//!
//! Thresholds here are policy, not hard limits. A policy file only needs to
//! name the values it overrides; everything else keeps its default.

use crate::{
    dataset::AccountType,
    error::{ValidateError, ValidateResult},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Inclusive credit score domain.
    pub credit_score: Range<i64>,
    /// Plausible customer age in completed years; outside is a warning.
    pub age_years: Range<i32>,
    /// Phone numbers are expected to use the fictional 555 exchange.
    pub phone_prefix: String,
    /// Account types whose balance may never go below zero.
    pub non_negative_account_types: Vec<String>,
    /// Interest rate ceilings, in percent.
    pub max_checking_rate: f64,
    pub max_savings_rate: f64,
    /// Reference date for age calculation.
    pub as_of: NaiveDate,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            credit_score: Range { min: 300, max: 850 },
            age_years: Range { min: 18, max: 120 },
            phone_prefix: "555-".into(),
            non_negative_account_types: vec![
                "Savings".into(),
                "CD".into(),
                "Money Market".into(),
            ],
            max_checking_rate: 1.0,
            max_savings_rate: 5.0,
            as_of: chrono::Local::now().date_naive(),
        }
    }
}

impl ValidatorConfig {
    /// Load a JSON policy file. Missing keys fall back to the defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ValidatorConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Same policy, fixed reference date.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Reject policies that could never be satisfied.
    pub fn validate(&self) -> ValidateResult<()> {
        if self.credit_score.min > self.credit_score.max {
            return Err(ValidateError::InvalidPolicy {
                reason: format!(
                    "credit_score.min {} exceeds credit_score.max {}",
                    self.credit_score.min, self.credit_score.max
                ),
            });
        }
        if self.age_years.min > self.age_years.max {
            return Err(ValidateError::InvalidPolicy {
                reason: format!(
                    "age_years.min {} exceeds age_years.max {}",
                    self.age_years.min, self.age_years.max
                ),
            });
        }
        if self.max_checking_rate < 0.0 || self.max_savings_rate < 0.0 {
            return Err(ValidateError::InvalidPolicy {
                reason: "interest rate ceilings must be non-negative".into(),
            });
        }
        Ok(())
    }

    pub fn requires_non_negative(&self, account_type: &AccountType) -> bool {
        self.non_negative_account_types
            .iter()
            .any(|t| t == account_type.as_str())
    }
}
