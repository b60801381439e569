//! League management around the rating engine
//!
//! This module provides the storage capability interface, the read-only
//! views over a league snapshot, and the manager that validates and
//! persists game submissions, deletions and roster changes.

pub mod manager;
pub mod storage;
pub mod views;

// Re-export commonly used types
pub use manager::LeagueManager;
pub use storage::{InMemoryLeagueStorage, LeagueSnapshot, LeagueStorage};
