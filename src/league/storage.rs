//! League storage interface and implementations
//!
//! The rating engine never touches storage. The league layer loads a
//! snapshot, computes on it in memory, and saves the result back.

use crate::error::{Result, TrackerError};
use crate::rating::roster::Roster;
use crate::types::{Game, Player};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Everything stored for one league
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl LeagueSnapshot {
    pub fn new(roster: &Roster, games: Vec<Game>) -> Self {
        Self {
            players: roster.to_sorted_vec(),
            games,
        }
    }

    pub fn roster(&self) -> Roster {
        self.players.iter().cloned().collect()
    }
}

/// Capability interface for persisting leagues
#[cfg_attr(test, mockall::automock)]
pub trait LeagueStorage: Send + Sync {
    /// Load a league, `None` if nothing was saved under `scope` yet
    fn load(&self, scope: &str) -> Result<Option<LeagueSnapshot>>;

    /// Replace the league stored under `scope`
    fn save(&self, scope: &str, snapshot: LeagueSnapshot) -> Result<()>;
}

/// In-memory league storage implementation
#[derive(Debug, Default)]
pub struct InMemoryLeagueStorage {
    leagues: RwLock<HashMap<String, LeagueSnapshot>>,
}

impl InMemoryLeagueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage already holding one league
    pub fn with_league(scope: &str, snapshot: LeagueSnapshot) -> Self {
        let mut leagues = HashMap::new();
        leagues.insert(scope.to_string(), snapshot);
        Self {
            leagues: RwLock::new(leagues),
        }
    }
}

impl LeagueStorage for InMemoryLeagueStorage {
    fn load(&self, scope: &str) -> Result<Option<LeagueSnapshot>> {
        let leagues = self
            .leagues
            .read()
            .map_err(|_| TrackerError::StorageError {
                message: "Failed to acquire leagues read lock".to_string(),
            })?;

        Ok(leagues.get(scope).cloned())
    }

    fn save(&self, scope: &str, snapshot: LeagueSnapshot) -> Result<()> {
        let mut leagues = self
            .leagues
            .write()
            .map_err(|_| TrackerError::StorageError {
                message: "Failed to acquire leagues write lock".to_string(),
            })?;

        leagues.insert(scope.to_string(), snapshot);
        Ok(())
    }
}
