//! Multiplayer Elo arithmetic
//!
//! A game with `n` placements is scored as a round robin: every player is
//! compared against every other player, collecting `k * (actual - expected)`
//! from each pairing. The per-player total is rounded half away from zero.

use crate::rating::roster::Roster;
use crate::types::{Player, PlayerId, RatingChanges};
use skillratings::elo::EloRating;
use std::collections::HashMap;

/// Probability-like expectation that a player rated `rating_a` finishes
/// ahead of one rated `rating_b`: `1 / (1 + 10^((b - a) / 400))`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    let (expected, _) = skillratings::elo::expected_score(
        &EloRating { rating: rating_a },
        &EloRating { rating: rating_b },
    );
    expected
}

/// Outcome of one pairing by placement index (lower is better):
/// 1.0 ahead, 0.5 tied, 0.0 behind.
pub fn actual_score(placement_a: usize, placement_b: usize) -> f64 {
    match placement_a.cmp(&placement_b) {
        std::cmp::Ordering::Less => 1.0,
        std::cmp::Ordering::Equal => 0.5,
        std::cmp::Ordering::Greater => 0.0,
    }
}

/// Unrounded round-robin totals for every placement that resolves in `roster`.
///
/// Unknown ids are skipped both as subject and as opponent.
pub fn compute_raw_deltas(
    placements: &[PlayerId],
    roster: &Roster,
    k_factor: f64,
) -> HashMap<PlayerId, f64> {
    let resolved: Vec<(usize, &Player)> = placements
        .iter()
        .enumerate()
        .filter_map(|(index, id)| roster.get(id).map(|player| (index, player)))
        .collect();

    let mut totals = HashMap::with_capacity(resolved.len());
    for &(i, player) in &resolved {
        let mut total = 0.0;
        for &(j, opponent) in &resolved {
            if i == j {
                continue;
            }
            let expected = expected_score(
                player.current_rating as f64,
                opponent.current_rating as f64,
            );
            total += k_factor * (actual_score(i, j) - expected);
        }
        totals.insert(player.id.clone(), total);
    }

    totals
}

/// Integer rating deltas for a finished game.
pub fn compute_deltas(placements: &[PlayerId], roster: &Roster, k_factor: f64) -> RatingChanges {
    compute_raw_deltas(placements, roster, k_factor)
        .into_iter()
        .map(|(id, total)| (id, round_delta(total)))
        .collect()
}

/// Rounds half away from zero, so 12.5 becomes 13 and -12.5 becomes -13.
pub fn round_delta(total: f64) -> i32 {
    total.round() as i32
}

/// Zero delta for every placement, used for games that are recorded but not rated
pub fn neutral_deltas(placements: &[PlayerId]) -> RatingChanges {
    placements.iter().map(|id| (id.clone(), 0)).collect()
}

/// True while a player has fewer than `threshold` games on record
pub fn has_low_confidence(player: &Player, threshold: u32) -> bool {
    player.games_played < threshold
}
