//! Rating calculator trait and implementations
//!
//! The league layer asks a `RatingCalculator` for the deltas of a finished
//! game. `EloRatingCalculator` is the round-robin Elo engine.

use crate::error::{Result, TrackerError};
use crate::rating::elo::{compute_deltas, neutral_deltas};
use crate::rating::roster::Roster;
use crate::rating::{DEFAULT_K_FACTOR, MONTHLY_K_FACTOR, STARTING_RATING};
use crate::types::{PlayerId, RatingChanges};

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// Calculate per-player deltas for a game
    ///
    /// # Arguments
    /// * `placements` - Player ids in finishing order, index 0 = first place
    /// * `roster` - Current ratings; ids missing from it are skipped
    fn calculate_deltas(&self, placements: &[PlayerId], roster: &Roster) -> RatingChanges;

    /// Rating assigned to new players
    fn initial_rating(&self) -> i32;
}

/// Deltas for a game, honouring the two-player exception.
///
/// Two-player games are recorded for activity only, so every participant
/// gets 0 and the calculator is not consulted.
pub fn game_deltas(
    calculator: &dyn RatingCalculator,
    placements: &[PlayerId],
    roster: &Roster,
) -> RatingChanges {
    if placements.len() == 2 {
        return neutral_deltas(placements);
    }
    calculator.calculate_deltas(placements, roster)
}

/// Configuration for the Elo calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloConfig {
    /// Scale of each pairwise exchange
    pub k_factor: f64,
    /// Rating for players with no games
    pub starting_rating: i32,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            starting_rating: STARTING_RATING,
        }
    }
}

impl EloConfig {
    /// Configuration used for isolated monthly seasons
    pub fn monthly() -> Self {
        Self {
            k_factor: MONTHLY_K_FACTOR,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(TrackerError::ConfigurationError {
                message: "K-factor must be a positive number".to_string(),
            }
            .into());
        }

        if self.starting_rating <= 0 {
            return Err(TrackerError::ConfigurationError {
                message: "Starting rating must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Round-robin Elo calculator
#[derive(Debug, Clone, Default)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo calculator
    pub fn new(config: EloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate_deltas(&self, placements: &[PlayerId], roster: &Roster) -> RatingChanges {
        compute_deltas(placements, roster, self.config.k_factor)
    }

    fn initial_rating(&self) -> i32 {
        self.config.starting_rating
    }
}
