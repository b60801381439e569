//! Ranking views over game history
//!
//! Time windows (all-time and monthly) and the leaderboards built from a
//! replayed roster.

pub mod standings;
pub mod window;

pub use standings::{build_standings, Standing, StandingsOptions};
pub use window::{Month, RankingView};
