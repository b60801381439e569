//! League manager
//!
//! Validates requests, drives the rating engine and persists the results
//! through a `LeagueStorage`. Each operation loads the league, works on the
//! in-memory copy and saves only once everything succeeded.

use crate::config::RatingConfig;
use crate::error::{Result, TrackerError};
use crate::league::storage::{InMemoryLeagueStorage, LeagueSnapshot, LeagueStorage};
use crate::league::views;
use crate::ranking::{RankingView, Standing};
use crate::rating::calculator::{game_deltas, EloRatingCalculator};
use crate::rating::roster::Roster;
use crate::types::{Game, GameId, Player, PlayerId};
use crate::utils::{current_timestamp, generate_game_id, generate_player_id, names_match};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Longest accepted display name
pub const MAX_NAME_LENGTH: usize = 64;

/// Manages players and games for one league
pub struct LeagueManager {
    storage: Arc<dyn LeagueStorage>,
    scope: String,
    config: RatingConfig,
    calculator: EloRatingCalculator,
}

impl LeagueManager {
    /// Create a manager for the league stored under `scope`
    pub fn new(
        storage: Arc<dyn LeagueStorage>,
        scope: impl Into<String>,
        config: RatingConfig,
    ) -> Result<Self> {
        config.validate()?;
        let calculator = EloRatingCalculator::new(config.elo_config())?;

        Ok(Self {
            storage,
            scope: scope.into(),
            config,
            calculator,
        })
    }

    /// Manager over an in-memory copy of `snapshot`, stored under `scope`.
    ///
    /// Changes made through it never leave the process.
    pub fn from_snapshot(
        scope: &str,
        snapshot: LeagueSnapshot,
        config: RatingConfig,
    ) -> Result<Self> {
        let storage = InMemoryLeagueStorage::with_league(scope, snapshot);
        Self::new(Arc::new(storage), scope, config)
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Current league contents, empty if nothing was saved yet
    pub fn snapshot(&self) -> Result<LeagueSnapshot> {
        Ok(self.storage.load(&self.scope)?.unwrap_or_default())
    }

    fn save(&self, roster: &Roster, games: Vec<Game>) -> Result<()> {
        self.storage
            .save(&self.scope, LeagueSnapshot::new(roster, games))
    }

    /// Add a new player at the starting rating
    pub fn add_player(&self, name: &str) -> Result<Player> {
        let snapshot = self.snapshot()?;
        let mut roster = snapshot.roster();

        let name = validate_name(name, &roster, None)?;
        let player = Player::new(generate_player_id(), name, self.config.starting_rating);
        roster.insert(player.clone());

        self.save(&roster, snapshot.games)?;
        info!("Added player '{}' ({})", player.name, player.id);
        Ok(player)
    }

    /// Change a player's display name
    pub fn rename_player(&self, player_id: &str, name: &str) -> Result<Player> {
        let snapshot = self.snapshot()?;
        let mut roster = snapshot.roster();

        let name = validate_name(name, &roster, Some(player_id))?;
        let player = roster
            .get_mut(player_id)
            .ok_or_else(|| TrackerError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;
        player.name = name;
        let renamed = player.clone();

        self.save(&roster, snapshot.games)?;
        info!("Renamed player {} to '{}'", renamed.id, renamed.name);
        Ok(renamed)
    }

    /// Remove a player from the roster. Their games stay in history.
    pub fn remove_player(&self, player_id: &str) -> Result<Player> {
        let snapshot = self.snapshot()?;
        let mut roster = snapshot.roster();

        let removed = roster
            .remove(player_id)
            .ok_or_else(|| TrackerError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;

        self.save(&roster, snapshot.games)?;
        info!("Removed player '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Record a finished game.
    ///
    /// `placements` lists player ids in finishing order. Two-player games are
    /// recorded with zero deltas. `date` defaults to now. A game dated before
    /// already stored games triggers a full replay so that later deltas and
    /// every rating history stay in date order.
    pub fn submit_game(
        &self,
        placements: Vec<PlayerId>,
        date: Option<DateTime<Utc>>,
    ) -> Result<Game> {
        let snapshot = self.snapshot()?;
        let roster = snapshot.roster();

        validate_placements(&placements, &roster)?;

        let rating_changes = game_deltas(&self.calculator, &placements, &roster);
        let game = Game::new(
            generate_game_id(),
            date.unwrap_or_else(current_timestamp),
            placements,
            rating_changes,
        );
        let backdated = snapshot.games.iter().any(|g| g.date > game.date);

        let mut games = snapshot.games;
        games.push(game.clone());
        games.sort_by_key(|g| g.date);

        let game = if backdated {
            // Later games were rated without this one, so the history is rebuilt in date order
            let outcome = views::recalculate(
                &LeagueSnapshot {
                    players: snapshot.players,
                    games,
                },
                &self.config,
            )?;
            let replayed = outcome
                .games
                .iter()
                .find(|g| g.id == game.id)
                .cloned()
                .unwrap_or(game);
            self.save(&outcome.roster, outcome.games)?;
            info!(
                "Game {} is dated {}, before existing games; replayed history",
                replayed.id, replayed.date
            );
            replayed
        } else {
            self.save(&roster.apply_game(&game), games)?;
            game
        };

        info!(
            "Recorded game {} with {} players{}",
            game.id,
            game.placements.len(),
            if game.is_two_player() { " (unrated)" } else { "" }
        );
        debug!("Rating changes for game {}: {:?}", game.id, game.rating_changes);
        Ok(game)
    }

    /// Delete a game and replay everything that remains
    pub fn delete_game(&self, game_id: GameId) -> Result<Game> {
        let snapshot = self.snapshot()?;
        let mut games = snapshot.games.clone();

        let index = games
            .iter()
            .position(|g| g.id == game_id)
            .ok_or_else(|| TrackerError::GameNotFound {
                game_id: game_id.to_string(),
            })?;
        let removed = games.remove(index);

        let remaining = LeagueSnapshot {
            players: snapshot.players,
            games,
        };
        let outcome = views::recalculate(&remaining, &self.config)?;

        self.save(&outcome.roster, outcome.games)?;
        info!(
            "Deleted game {} and replayed {} remaining games",
            removed.id,
            remaining.games.len()
        );
        Ok(removed)
    }

    /// Update optional game details. Ratings are not affected.
    pub fn update_game_metadata(
        &self,
        game_id: GameId,
        expansions: Vec<String>,
        generations: Option<u32>,
    ) -> Result<Game> {
        let snapshot = self.snapshot()?;
        let mut games = snapshot.games;

        let game = games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or_else(|| TrackerError::GameNotFound {
                game_id: game_id.to_string(),
            })?;
        game.expansions = expansions;
        game.generations = generations;
        let updated = game.clone();

        let roster: Roster = snapshot.players.into_iter().collect();
        self.save(&roster, games)?;
        debug!("Updated metadata for game {}", updated.id);
        Ok(updated)
    }

    /// Leaderboard for a view. Nothing is persisted.
    pub fn standings(&self, view: RankingView) -> Result<Vec<Standing>> {
        views::standings_for(&self.snapshot()?, view, &self.config)
    }

    /// Replay the whole history with the current configuration and save it
    pub fn recalculate(&self) -> Result<()> {
        let snapshot = self.snapshot()?;
        let outcome = views::recalculate(&snapshot, &self.config)?;

        self.save(&outcome.roster, outcome.games)?;
        info!("Recalculated ratings for {} players", outcome.roster.len());
        Ok(())
    }

    /// Players whose stored record differs from a full replay
    pub fn verify_history(&self) -> Result<Vec<PlayerId>> {
        views::verify(&self.snapshot()?, &self.config)
    }
}

fn validate_name(name: &str, roster: &Roster, renaming: Option<&str>) -> Result<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(TrackerError::InvalidPlayerName {
            reason: "name cannot be empty".to_string(),
        }
        .into());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(TrackerError::InvalidPlayerName {
            reason: format!("name cannot be longer than {} characters", MAX_NAME_LENGTH),
        }
        .into());
    }

    let taken = roster
        .players()
        .filter(|p| Some(p.id.as_str()) != renaming)
        .any(|p| names_match(&p.name, name));
    if taken {
        return Err(TrackerError::DuplicatePlayerName {
            name: name.to_string(),
        }
        .into());
    }

    Ok(name.to_string())
}

fn validate_placements(placements: &[PlayerId], roster: &Roster) -> Result<()> {
    if placements.len() < 2 {
        return Err(TrackerError::NotEnoughPlayers {
            count: placements.len(),
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(placements.len());
    for player_id in placements {
        if !seen.insert(player_id.as_str()) {
            return Err(TrackerError::DuplicatePlacement {
                player_id: player_id.clone(),
            }
            .into());
        }
        if !roster.contains(player_id) {
            return Err(TrackerError::PlayerNotFound {
                player_id: player_id.clone(),
            }
            .into());
        }
    }

    Ok(())
}
