use crate::rates::{
    DEFAULT_RATE, PRODUCTIVITY_RATES, SAFETY_FACTOR, UNIT_FRAGMENT_RATES, UNIT_RATES,
};
use crate::sequence::{SEQUENCE_RULES, UNMATCHED_ORDER, UNMATCHED_WEIGHT, normalize_category};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRate {
    /// Lowercase fragment searched for in the item name.
    pub keyword: String,
    /// Daily output of one team, in the item's own unit.
    pub daily_output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRate {
    pub unit: String,
    pub daily_output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRule {
    /// Lowercase ASCII letters, matched against the normalized category.
    pub keyword: String,
    pub order: u32,
    pub weight: f64,
}

/// Tables and constants driving the estimator.
///
/// Passed explicitly to every calculation; `Default` yields the built-in
/// tables. All table fields are ordered lists because matching is
/// first-match-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub safety_factor: f64,
    /// People per standard team.
    pub team_size: u32,
    pub default_rate: f64,
    pub productivity_rates: Vec<ProductivityRate>,
    pub unit_rates: Vec<UnitRate>,
    /// Substring fallbacks tried when no exact unit matches, e.g. `m2` in `m2 (luas)`.
    pub unit_fragment_rates: Vec<UnitRate>,
    pub sequence_rules: Vec<SequenceRule>,
    pub unmatched_order: u32,
    pub unmatched_weight: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            safety_factor: SAFETY_FACTOR,
            team_size: 2,
            default_rate: DEFAULT_RATE,
            productivity_rates: PRODUCTIVITY_RATES
                .iter()
                .map(|(keyword, daily_output)| ProductivityRate {
                    keyword: (*keyword).to_string(),
                    daily_output: *daily_output,
                })
                .collect(),
            unit_rates: unit_table(UNIT_RATES),
            unit_fragment_rates: unit_table(UNIT_FRAGMENT_RATES),
            sequence_rules: SEQUENCE_RULES
                .iter()
                .map(|(keyword, order, weight)| SequenceRule {
                    keyword: (*keyword).to_string(),
                    order: *order,
                    weight: *weight,
                })
                .collect(),
            unmatched_order: UNMATCHED_ORDER,
            unmatched_weight: UNMATCHED_WEIGHT,
        }
    }
}

fn unit_table(rows: &[(&str, f64)]) -> Vec<UnitRate> {
    rows.iter()
        .map(|(unit, daily_output)| UnitRate {
            unit: (*unit).to_string(),
            daily_output: *daily_output,
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EstimatorConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.safety_factor.is_finite() || self.safety_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "safety_factor must be positive (got {})",
                self.safety_factor
            )));
        }
        if self.team_size == 0 {
            return Err(ConfigError::Invalid("team_size must be at least 1".into()));
        }
        if !self.default_rate.is_finite() || self.default_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_rate must be positive (got {})",
                self.default_rate
            )));
        }
        for rate in &self.productivity_rates {
            if rate.keyword.trim().is_empty() || rate.keyword != rate.keyword.to_lowercase() {
                return Err(ConfigError::Invalid(format!(
                    "productivity keyword '{}' must be non-empty lowercase text",
                    rate.keyword
                )));
            }
            Self::check_output(&rate.keyword, rate.daily_output)?;
        }
        for rate in self.unit_rates.iter().chain(&self.unit_fragment_rates) {
            let unit = rate.unit.as_str();
            if unit.is_empty() || unit.trim() != unit || unit != unit.to_lowercase() {
                return Err(ConfigError::Invalid(format!(
                    "unit '{}' must be non-empty, trimmed and lowercase",
                    rate.unit
                )));
            }
            Self::check_output(&rate.unit, rate.daily_output)?;
        }
        for rule in &self.sequence_rules {
            if rule.keyword.is_empty() || normalize_category(&rule.keyword) != rule.keyword {
                return Err(ConfigError::Invalid(format!(
                    "sequence keyword '{}' must contain lowercase ASCII letters only",
                    rule.keyword
                )));
            }
            if !rule.weight.is_finite() || rule.weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sequence weight for '{}' must be non-negative",
                    rule.keyword
                )));
            }
        }
        Ok(())
    }

    fn check_output(key: &str, daily_output: f64) -> Result<(), ConfigError> {
        if !daily_output.is_finite() || daily_output <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "daily output for '{key}' must be positive (got {daily_output})"
            )));
        }
        Ok(())
    }

    pub(crate) fn keyword_rate(&self, lowercase_name: &str) -> Option<f64> {
        self.productivity_rates
            .iter()
            .find(|rate| !rate.keyword.is_empty() && lowercase_name.contains(rate.keyword.as_str()))
            .map(|rate| rate.daily_output)
    }

    pub(crate) fn exact_unit_rate(&self, normalized_unit: &str) -> Option<f64> {
        self.unit_rates
            .iter()
            .find(|rate| rate.unit == normalized_unit)
            .map(|rate| rate.daily_output)
    }

    pub(crate) fn fragment_unit_rate(&self, normalized_unit: &str) -> Option<f64> {
        self.unit_fragment_rates
            .iter()
            .find(|rate| normalized_unit.contains(rate.unit.as_str()))
            .map(|rate| rate.daily_output)
    }
}
