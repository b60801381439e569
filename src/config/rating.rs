//! Rating system configuration

use crate::rating::calculator::EloConfig;
use crate::rating::replay::DeltaSource;
use crate::rating::{
    DEFAULT_K_FACTOR, LOW_CONFIDENCE_THRESHOLD, MONTHLY_K_FACTOR,
    MONTHLY_LOW_CONFIDENCE_THRESHOLD, STARTING_RATING,
};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Rating parameters for the league
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating new players start at
    pub starting_rating: i32,
    /// K-factor for live games and the all-time / accumulated views
    pub k_factor: f64,
    /// K-factor for the monthly independent view
    pub monthly_k_factor: f64,
    /// Games below which an all-time rating is flagged
    pub low_confidence_threshold: u32,
    /// Games below which a monthly rating is flagged
    pub monthly_low_confidence_threshold: u32,
    /// Delta source for the monthly accumulated view. Recalculation,
    /// verification and deletion always recompute.
    pub delta_source: DeltaSource,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            starting_rating: STARTING_RATING,
            k_factor: DEFAULT_K_FACTOR,
            monthly_k_factor: MONTHLY_K_FACTOR,
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
            monthly_low_confidence_threshold: MONTHLY_LOW_CONFIDENCE_THRESHOLD,
            delta_source: DeltaSource::Recompute,
        }
    }
}

impl RatingConfig {
    pub fn elo_config(&self) -> EloConfig {
        EloConfig {
            k_factor: self.k_factor,
            starting_rating: self.starting_rating,
        }
    }

    pub fn monthly_elo_config(&self) -> EloConfig {
        EloConfig {
            k_factor: self.monthly_k_factor,
            starting_rating: self.starting_rating,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.elo_config().validate()?;
        self.monthly_elo_config().validate()?;

        if self.low_confidence_threshold == 0 {
            return Err(anyhow!("Low confidence threshold must be greater than 0"));
        }
        if self.monthly_low_confidence_threshold == 0 {
            return Err(anyhow!(
                "Monthly low confidence threshold must be greater than 0"
            ));
        }

        Ok(())
    }
}
