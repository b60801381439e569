//! Multiplayer Elo rating engine
//!
//! This module holds the pure rating computation: expected and actual
//! scores, round-robin deltas, application of games to players, and the
//! chronological replay used when history changes.

pub mod calculator;
pub mod elo;
pub mod replay;
pub mod roster;

// Re-export commonly used types
pub use calculator::{game_deltas, EloConfig, EloRatingCalculator, RatingCalculator};
pub use elo::{actual_score, compute_deltas, expected_score, has_low_confidence};
pub use replay::{replay, DeltaSource, InitialRatings, ReplayOptions, ReplayOutcome};
pub use roster::Roster;

/// Rating every player starts at
pub const STARTING_RATING: i32 = 1500;

/// K-factor for the all-time ladder
pub const DEFAULT_K_FACTOR: f64 = 40.0;

/// K-factor for isolated monthly seasons
pub const MONTHLY_K_FACTOR: f64 = 32.0;

/// Games needed before an all-time rating is considered settled
pub const LOW_CONFIDENCE_THRESHOLD: u32 = 10;

/// Games needed before a monthly rating is considered settled
pub const MONTHLY_LOW_CONFIDENCE_THRESHOLD: u32 = 5;
