//! Leaderboard construction

use crate::rating::elo::has_low_confidence;
use crate::rating::roster::Roster;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based; players on equal ratings share a rank
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub peak_rating: i32,
    pub games_played: u32,
    pub wins: u32,
    pub win_rate: f64,
    /// Rating change since the start of the view
    pub change: i32,
    pub low_confidence: bool,
}

/// Options for building a leaderboard
#[derive(Debug, Clone, Copy)]
pub struct StandingsOptions {
    pub low_confidence_threshold: u32,
    /// Keep players with no games in the view
    pub include_inactive: bool,
}

/// Build a leaderboard from `roster`, sorted by rating (highest first), then name.
///
/// `initial_rating` returns the rating a player entered the view with and is
/// used for the `change` column.
pub fn build_standings<F>(roster: &Roster, initial_rating: F, options: StandingsOptions) -> Vec<Standing>
where
    F: Fn(&str) -> Option<i32>,
{
    let mut players: Vec<_> = roster
        .players()
        .filter(|player| options.include_inactive || player.games_played > 0)
        .collect();

    players.sort_by(|a, b| {
        b.current_rating
            .cmp(&a.current_rating)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut standings: Vec<Standing> = Vec::with_capacity(players.len());
    for (position, player) in players.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(previous) if previous.rating == player.current_rating => previous.rank,
            _ => position + 1,
        };
        let start = initial_rating(&player.id).unwrap_or(player.current_rating);

        standings.push(Standing {
            rank,
            player_id: player.id.clone(),
            name: player.name.clone(),
            rating: player.current_rating,
            peak_rating: player.peak_rating,
            games_played: player.games_played,
            wins: player.wins,
            win_rate: player.win_rate(),
            change: player.current_rating - start,
            low_confidence: has_low_confidence(player, options.low_confidence_threshold),
        });
    }

    standings
}
