//! Utility functions for the ranking tracker

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique player ID
pub fn generate_player_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a new unique game ID
pub fn generate_game_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Display names are compared ignoring case and surrounding whitespace
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
