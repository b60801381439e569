//! Chronological replay of game history
//!
//! Ratings depend on the opponents' ratings at the time each game was
//! played, so any change to history (a deleted game, a new k-factor, a
//! windowed view) is handled by resetting players and re-applying the
//! games in date order.

use crate::rating::calculator::{game_deltas, RatingCalculator};
use crate::rating::roster::Roster;
use crate::types::{Game, Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where replay takes each game's deltas from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaSource {
    /// Always recompute from the ratings at that point in the replay
    #[default]
    Recompute,
    /// Reuse a game's stored deltas when it has any, recompute otherwise
    TrustStored,
}

/// Rating each player starts the replay from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialRatings {
    /// Everyone restarts at the calculator's initial rating
    #[default]
    Baseline,
    /// Everyone restarts at the rating they held entering `window_start`
    CarryOver { window_start: DateTime<Utc> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    pub delta_source: DeltaSource,
    pub initial: InitialRatings,
}

/// Result of a replay
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Players after every game was applied
    pub roster: Roster,
    /// The replayed games in date order, carrying the deltas actually applied
    pub games: Vec<Game>,
    /// Rating each player held before the first replayed game
    pub initial_ratings: Vec<(PlayerId, i32)>,
}

impl ReplayOutcome {
    pub fn initial_rating(&self, player_id: &str) -> Option<i32> {
        self.initial_ratings
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, rating)| *rating)
    }
}

/// Rating a player held entering `window_start`, read from their stored ledger.
///
/// Uses the latest entry dated before the window. A player whose first game
/// is inside (or after) the window is back-computed from the earliest
/// entry's `rating - change`. A player with no history gets `baseline`.
/// Entries are compared by date, not by ledger position.
pub fn carry_over_rating(player: &Player, window_start: DateTime<Utc>, baseline: i32) -> i32 {
    let history = &player.rating_history;

    if let Some(entry) = history
        .iter()
        .filter(|entry| entry.date < window_start)
        .max_by_key(|entry| entry.date)
    {
        return entry.rating;
    }

    history
        .iter()
        .min_by_key(|entry| entry.date)
        .map(|entry| entry.rating_before())
        .unwrap_or(baseline)
}

/// Replay `games` over `roster` from reset ratings.
///
/// Every player in `roster` is reset (counters and history cleared, rating
/// chosen by `options.initial`), games are sorted by date and applied one by
/// one. Deltas come from `calculator` unless `options.delta_source` says to
/// trust non-empty stored deltas. Players that no longer exist are skipped.
pub fn replay(
    roster: &Roster,
    games: &[Game],
    calculator: &dyn RatingCalculator,
    options: &ReplayOptions,
) -> ReplayOutcome {
    let baseline = calculator.initial_rating();
    let mut replayed = roster.clone();
    let mut initial_ratings = Vec::with_capacity(replayed.len());

    for player in replayed.players_mut() {
        let start = match options.initial {
            InitialRatings::Baseline => baseline,
            InitialRatings::CarryOver { window_start } => {
                carry_over_rating(player, window_start, baseline)
            }
        };
        player.reset(start);
        initial_ratings.push((player.id.clone(), start));
    }
    initial_ratings.sort();

    let mut ordered: Vec<Game> = games.to_vec();
    ordered.sort_by_key(|game| game.date);

    let mut skipped_games = 0usize;
    for game in ordered.iter_mut() {
        let missing: Vec<&PlayerId> = game
            .placements
            .iter()
            .filter(|id| !replayed.contains(id))
            .collect();
        if !missing.is_empty() {
            debug!(
                "Game {} references unknown players {:?}, skipping them",
                game.id, missing
            );
            skipped_games += 1;
        }

        let trust_stored =
            options.delta_source == DeltaSource::TrustStored && !game.rating_changes.is_empty();
        if !trust_stored {
            game.rating_changes = game_deltas(calculator, &game.placements, &replayed);
        }

        debug!(
            "Replaying game {} ({}) with {} placements",
            game.id,
            game.date,
            game.placements.len()
        );
        replayed.record_game(game);
    }

    if skipped_games > 0 {
        warn!(
            "{} replayed games reference players no longer in the roster",
            skipped_games
        );
    }
    info!(
        "Replayed {} games over {} players",
        ordered.len(),
        replayed.len()
    );

    ReplayOutcome {
        roster: replayed,
        games: ordered,
        initial_ratings,
    }
}

/// Ids of players whose replayed record differs from the stored one, sorted
pub fn diverging_players(stored: &Roster, replayed: &Roster) -> Vec<PlayerId> {
    let mut diverging: Vec<PlayerId> = stored
        .players()
        .filter(|player| replayed.get(&player.id) != Some(*player))
        .map(|player| player.id.clone())
        .collect();
    diverging.sort();
    diverging
}
