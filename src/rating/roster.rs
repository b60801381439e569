//! Player lookup and game application
//!
//! `Roster` is the id -> player mapping the engine reads ratings from and
//! writes game results into. Lookups of unknown ids yield `None`, and every
//! operation that meets an unknown id skips it.

use crate::types::{Game, Player, PlayerId, RatingHistoryEntry};
use std::collections::HashMap;
use tracing::debug;

/// Mapping from player id to player record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: HashMap<PlayerId, Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn get_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.get_mut(player_id)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.contains_key(player_id)
    }

    /// Insert or replace a player, returning the previous record
    pub fn insert(&mut self, player: Player) -> Option<Player> {
        self.players.insert(player.id.clone(), player)
    }

    pub fn remove(&mut self, player_id: &str) -> Option<Player> {
        self.players.remove(player_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    /// Players ordered by id, for stable output
    pub fn to_sorted_vec(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        players
    }

    /// Apply a game to a copy of this roster, leaving `self` untouched
    pub fn apply_game(&self, game: &Game) -> Roster {
        let mut updated = self.clone();
        updated.record_game(game);
        updated
    }

    /// Apply a game's stored rating changes in place.
    ///
    /// Placements are processed in order, so index 0 is credited with the
    /// win. Each known player gets their delta (0 if absent), one more game
    /// played, a possible new peak, and a ledger entry. Unknown ids are
    /// skipped. Returns how many players were updated.
    pub fn record_game(&mut self, game: &Game) -> usize {
        let mut applied = 0;

        for (index, player_id) in game.placements.iter().enumerate() {
            let Some(player) = self.players.get_mut(player_id) else {
                debug!("Skipping unknown player {} in game {}", player_id, game.id);
                continue;
            };

            let change = game.change_for(player_id);
            let new_rating = player.current_rating + change;

            player.current_rating = new_rating;
            player.peak_rating = player.peak_rating.max(new_rating);
            player.games_played += 1;
            if index == 0 {
                player.wins += 1;
            }
            player.rating_history.push(RatingHistoryEntry {
                game_id: game.id,
                rating: new_rating,
                change,
                date: game.date,
            });

            applied += 1;
        }

        debug!("Applied game {} to {} players", game.id, applied);
        applied
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }
}

impl IntoIterator for Roster {
    type Item = Player;
    type IntoIter = std::collections::hash_map::IntoValues<PlayerId, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingChanges;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn roster_of(ids: &[&str]) -> Roster {
        ids.iter().map(|id| Player::new(*id, *id, 1500)).collect()
    }

    fn game_with(placements: &[&str], changes: &[(&str, i32)]) -> Game {
        let changes: RatingChanges = changes
            .iter()
            .map(|(id, delta)| (id.to_string(), *delta))
            .collect();
        Game::new(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap(),
            placements.iter().map(|id| id.to_string()).collect(),
            changes,
        )
    }

    #[test]
    fn test_apply_game_updates_all_fields() {
        let roster = roster_of(&["a", "b", "c"]);
        let game = game_with(&["a", "b", "c"], &[("a", 40), ("b", 0), ("c", -40)]);

        let updated = roster.apply_game(&game);

        let a = updated.get("a").unwrap();
        assert_eq!(a.current_rating, 1540);
        assert_eq!(a.peak_rating, 1540);
        assert_eq!(a.games_played, 1);
        assert_eq!(a.wins, 1);
        assert_eq!(a.rating_history.len(), 1);
        assert_eq!(a.rating_history[0].game_id, game.id);
        assert_eq!(a.rating_history[0].rating, 1540);
        assert_eq!(a.rating_history[0].change, 40);
        assert_eq!(a.rating_history[0].date, game.date);

        let c = updated.get("c").unwrap();
        assert_eq!(c.current_rating, 1460);
        assert_eq!(c.peak_rating, 1500);
        assert_eq!(c.wins, 0);
        assert_eq!(c.games_played, 1);
    }

    #[test]
    fn test_apply_game_leaves_original_untouched() {
        let roster = roster_of(&["a", "b", "c"]);
        let game = game_with(&["a", "b", "c"], &[("a", 40), ("b", 0), ("c", -40)]);

        let _updated = roster.apply_game(&game);

        assert_eq!(roster.get("a").unwrap().current_rating, 1500);
        assert_eq!(roster.get("a").unwrap().games_played, 0);
    }

    #[test]
    fn test_missing_delta_defaults_to_zero() {
        let roster = roster_of(&["a", "b", "c"]);
        let game = game_with(&["a", "b", "c"], &[("a", 10)]);

        let updated = roster.apply_game(&game);
        let b = updated.get("b").unwrap();
        assert_eq!(b.current_rating, 1500);
        assert_eq!(b.games_played, 1);
        assert_eq!(b.rating_history[0].change, 0);
    }

    #[test]
    fn test_unknown_players_are_skipped() {
        let mut roster = roster_of(&["a", "c"]);
        let game = game_with(&["ghost", "a", "c"], &[("ghost", 30), ("a", 5), ("c", -35)]);

        let applied = roster.record_game(&game);

        assert_eq!(applied, 2);
        assert!(roster.get("ghost").is_none());
        // "a" finished second, behind the unknown player
        assert_eq!(roster.get("a").unwrap().wins, 0);
        assert_eq!(roster.get("a").unwrap().current_rating, 1505);
    }

    #[test]
    fn test_history_length_tracks_games_played() {
        let mut roster = roster_of(&["a", "b"]);
        for _ in 0..3 {
            roster.record_game(&game_with(&["a", "b"], &[("a", 0), ("b", 0)]));
        }

        for player in roster.players() {
            assert_eq!(player.rating_history.len() as u32, player.games_played);
        }
        assert_eq!(roster.get("a").unwrap().wins, 3);
    }

    #[test]
    fn test_peak_rating_survives_losses() {
        let mut roster = roster_of(&["a", "b", "c"]);
        roster.record_game(&game_with(&["a", "b", "c"], &[("a", 40), ("b", 0), ("c", -40)]));
        roster.record_game(&game_with(&["b", "c", "a"], &[("b", 40), ("c", 7), ("a", -47)]));

        let a = roster.get("a").unwrap();
        assert_eq!(a.current_rating, 1493);
        assert_eq!(a.peak_rating, 1540);
    }
}
