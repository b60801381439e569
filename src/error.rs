//! Error types for the ranking tracker
//!
//! The rating engine itself is infallible. These errors belong to the
//! league layer, which validates requests before the engine runs.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific league scenarios
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Not enough players: a game needs at least 2 placements, got {count}")]
    NotEnoughPlayers { count: usize },

    #[error("Player {player_id} appears more than once in the placements")]
    DuplicatePlacement { player_id: String },

    #[error("A player named '{name}' already exists")]
    DuplicatePlayerName { name: String },

    #[error("Invalid player name: {reason}")]
    InvalidPlayerName { reason: String },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    #[error("Invalid ranking window: {reason}")]
    InvalidWindow { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}
