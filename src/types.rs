//! Common types used throughout the ranking tracker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for games
pub type GameId = Uuid;

/// Signed rating delta per player for a single game
pub type RatingChanges = HashMap<PlayerId, i32>;

/// One entry in a player's rating ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistoryEntry {
    pub game_id: GameId,
    /// Rating after the game was applied
    pub rating: i32,
    pub change: i32,
    pub date: DateTime<Utc>,
}

impl RatingHistoryEntry {
    /// Rating the player held before this entry was applied
    pub fn rating_before(&self) -> i32 {
        self.rating - self.change
    }
}

/// A tracked player and their rating state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub current_rating: i32,
    pub peak_rating: i32,
    pub games_played: u32,
    pub wins: u32,
    #[serde(default)]
    pub rating_history: Vec<RatingHistoryEntry>,
}

impl Player {
    /// Create a player who has not played yet
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, starting_rating: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_rating: starting_rating,
            peak_rating: starting_rating,
            games_played: 0,
            wins: 0,
            rating_history: Vec::new(),
        }
    }

    /// Clear counters and history, starting again from `rating`
    pub fn reset(&mut self, rating: i32) {
        self.current_rating = rating;
        self.peak_rating = rating;
        self.games_played = 0;
        self.wins = 0;
        self.rating_history.clear();
    }

    /// Fraction of played games that were won, 0.0 when none were played
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games_played as f64
    }
}

/// A completed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub date: DateTime<Utc>,
    /// Player ids in finishing order, index 0 is first place
    pub placements: Vec<PlayerId>,
    #[serde(default)]
    pub rating_changes: RatingChanges,
    #[serde(default)]
    pub expansions: Vec<String>,
    #[serde(default)]
    pub generations: Option<u32>,
}

impl Game {
    pub fn new(
        id: GameId,
        date: DateTime<Utc>,
        placements: Vec<PlayerId>,
        rating_changes: RatingChanges,
    ) -> Self {
        Self {
            id,
            date,
            placements,
            rating_changes,
            expansions: Vec::new(),
            generations: None,
        }
    }

    /// Two-player games are tracked for activity but never rated
    pub fn is_two_player(&self) -> bool {
        self.placements.len() == 2
    }

    /// Stored delta for a player, 0 when none was recorded
    pub fn change_for(&self, player_id: &str) -> i32 {
        self.rating_changes.get(player_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new("p1", "Alice", 1500);
        assert_eq!(player.current_rating, 1500);
        assert_eq!(player.peak_rating, 1500);
        assert_eq!(player.games_played, 0);
        assert_eq!(player.wins, 0);
        assert!(player.rating_history.is_empty());
        assert_eq!(player.win_rate(), 0.0);
    }

    #[test]
    fn test_history_entry_rating_before() {
        let entry = RatingHistoryEntry {
            game_id: Uuid::new_v4(),
            rating: 1540,
            change: 40,
            date: Utc::now(),
        };
        assert_eq!(entry.rating_before(), 1500);
    }

    #[test]
    fn test_game_change_for_missing_player() {
        let mut changes = RatingChanges::new();
        changes.insert("a".to_string(), 12);
        let game = Game::new(
            Uuid::new_v4(),
            Utc::now(),
            vec!["a".to_string(), "b".to_string()],
            changes,
        );

        assert_eq!(game.change_for("a"), 12);
        assert_eq!(game.change_for("b"), 0);
        assert!(game.is_two_player());
    }

    #[test]
    fn test_game_deserializes_without_metadata() {
        let json = serde_json::json!({
            "id": "6f1c2a8e-3b7d-4c39-9a41-0d6f8e2b5c11",
            "date": "2024-03-01T00:00:00Z",
            "placements": ["a", "b", "c"]
        });

        let game: Game = serde_json::from_value(json).unwrap();
        assert!(game.rating_changes.is_empty());
        assert!(game.expansions.is_empty());
        assert_eq!(game.generations, None);
    }
}
