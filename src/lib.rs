//! Ranking Tracker - Multiplayer Elo ratings for board game leagues
//!
//! This crate records multiplayer game results and maintains Elo-style
//! ratings, with chronological replay for deleted games and monthly views.

pub mod config;
pub mod error;
pub mod league;
pub mod ranking;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TrackerError};
pub use types::*;

// Re-export key components
pub use league::{InMemoryLeagueStorage, LeagueManager, LeagueSnapshot, LeagueStorage};
pub use ranking::{Month, RankingView, Standing};
pub use rating::{RatingCalculator, Roster};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
