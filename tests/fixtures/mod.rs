//! Test fixtures and storage doubles for integration testing

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use ranking_tracker::config::RatingConfig;
use ranking_tracker::error::Result;
use ranking_tracker::league::{InMemoryLeagueStorage, LeagueManager, LeagueSnapshot, LeagueStorage};
use ranking_tracker::types::PlayerId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Storage that records every save on top of an in-memory league
#[derive(Debug, Default)]
pub struct RecordingLeagueStorage {
    inner: InMemoryLeagueStorage,
    saves: Mutex<Vec<(String, LeagueSnapshot)>>,
}

impl RecordingLeagueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves made so far
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|saves| saves.len()).unwrap_or(0)
    }

    /// The most recent snapshot saved
    pub fn last_saved(&self) -> Option<LeagueSnapshot> {
        self.saves
            .lock()
            .ok()
            .and_then(|saves| saves.last().map(|(_, snapshot)| snapshot.clone()))
    }
}

impl LeagueStorage for RecordingLeagueStorage {
    fn load(&self, scope: &str) -> Result<Option<LeagueSnapshot>> {
        self.inner.load(scope)
    }

    fn save(&self, scope: &str, snapshot: LeagueSnapshot) -> Result<()> {
        if let Ok(mut saves) = self.saves.lock() {
            saves.push((scope.to_string(), snapshot.clone()));
        }
        self.inner.save(scope, snapshot)
    }
}

/// A league with named players, ready for game submissions
pub struct TestLeague {
    pub manager: LeagueManager,
    pub storage: Arc<RecordingLeagueStorage>,
    ids: HashMap<String, PlayerId>,
}

impl TestLeague {
    pub fn new(names: &[&str]) -> Self {
        Self::with_config(names, RatingConfig::default())
    }

    pub fn with_config(names: &[&str], config: RatingConfig) -> Self {
        let storage = Arc::new(RecordingLeagueStorage::new());
        let manager = LeagueManager::new(storage.clone(), "test-league", config)
            .expect("valid rating config");

        let ids = names
            .iter()
            .map(|name| {
                let player = manager.add_player(name).expect("unique player name");
                (name.to_string(), player.id)
            })
            .collect();

        Self {
            manager,
            storage,
            ids,
        }
    }

    pub fn id(&self, name: &str) -> PlayerId {
        self.ids[name].clone()
    }

    pub fn placements(&self, names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|name| self.id(name)).collect()
    }

    /// Submit a game by player names
    pub fn play(&self, names: &[&str], date: DateTime<Utc>) -> ranking_tracker::Game {
        self.manager
            .submit_game(self.placements(names), Some(date))
            .expect("valid game")
    }

    /// Current stored rating by player name
    pub fn rating(&self, name: &str) -> i32 {
        self.player(name).current_rating
    }

    pub fn player(&self, name: &str) -> ranking_tracker::Player {
        let id = self.id(name);
        self.manager
            .snapshot()
            .expect("league loads")
            .players
            .into_iter()
            .find(|p| p.id == id)
            .expect("player exists")
    }
}

/// Evening of the given day in 2024
pub fn evening(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 20, 0, 0).unwrap()
}
