use serde::{Deserialize, Serialize};

use crate::error::CarbonError;

/// Upper bound on `days`, about ten years.
pub const MAX_DAYS: u32 = 3_660;
pub const MAX_PER_DAY: u32 = 1_000;

/// Tuning knobs for the synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Length of the historical window, counted back from the anchor
    pub days: u32,
    /// Inclusive lower bound of observations per day
    pub min_per_day: u32,
    /// Inclusive upper bound of observations per day
    pub max_per_day: u32,
    pub verified_probability: f64,
    /// Number of distinct submitter ids to draw from (`F000`..)
    pub submitter_pool: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: 90,
            min_per_day: 5,
            max_per_day: 15,
            verified_probability: 0.85,
            submitter_pool: 1000,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, CarbonError> {
        let config: GeneratorConfig = serde_json::from_str(json)
            .map_err(|e| CarbonError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CarbonError> {
        self.check().inspect_err(|e| {
            tracing::warn!(error = %e, "rejected generator config");
        })
    }

    fn check(&self) -> Result<(), CarbonError> {
        if self.days == 0 || self.days > MAX_DAYS {
            return Err(CarbonError::InvalidConfig(format!(
                "days {} outside 1..={}",
                self.days, MAX_DAYS
            )));
        }
        if self.max_per_day == 0 || self.min_per_day > self.max_per_day {
            return Err(CarbonError::InvalidConfig(format!(
                "per-day range {}..={} is empty",
                self.min_per_day, self.max_per_day
            )));
        }
        if self.max_per_day > MAX_PER_DAY {
            return Err(CarbonError::InvalidConfig(format!(
                "max_per_day {} exceeds {}",
                self.max_per_day, MAX_PER_DAY
            )));
        }
        if !(0.0..=1.0).contains(&self.verified_probability) {
            return Err(CarbonError::InvalidConfig(format!(
                "verified_probability {} outside [0, 1]",
                self.verified_probability
            )));
        }
        // Ids are rendered with three digits.
        if self.submitter_pool == 0 || self.submitter_pool > 1000 {
            return Err(CarbonError::InvalidConfig(format!(
                "submitter_pool {} outside 1..=1000",
                self.submitter_pool
            )));
        }
        Ok(())
    }
}
