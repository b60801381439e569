//! Main application configuration
//!
//! This module defines the primary configuration structures for the ranking
//! tracker, including environment variable and TOML file loading and validation.

use crate::config::rating::RatingConfig;
use crate::rating::replay::DeltaSource;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Storage scope the league lives under
    pub league: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "ranking-tracker".to_string(),
            log_level: "info".to_string(),
            league: "default".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(league) = env::var("LEAGUE") {
            self.service.league = league;
        }

        // Rating settings
        if let Ok(rating) = env::var("STARTING_RATING") {
            self.rating.starting_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid STARTING_RATING value: {}", rating))?;
        }
        if let Ok(k) = env::var("K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k))?;
        }
        if let Ok(k) = env::var("MONTHLY_K_FACTOR") {
            self.rating.monthly_k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid MONTHLY_K_FACTOR value: {}", k))?;
        }
        if let Ok(threshold) = env::var("LOW_CONFIDENCE_THRESHOLD") {
            self.rating.low_confidence_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("Invalid LOW_CONFIDENCE_THRESHOLD value: {}", threshold))?;
        }
        if let Ok(threshold) = env::var("MONTHLY_LOW_CONFIDENCE_THRESHOLD") {
            self.rating.monthly_low_confidence_threshold = threshold.parse().map_err(|_| {
                anyhow!("Invalid MONTHLY_LOW_CONFIDENCE_THRESHOLD value: {}", threshold)
            })?;
        }
        if let Ok(trust) = env::var("TRUST_STORED_DELTAS") {
            let trust: bool = trust
                .parse()
                .map_err(|_| anyhow!("Invalid TRUST_STORED_DELTAS value: {}", trust))?;
            self.rating.delta_source = if trust {
                DeltaSource::TrustStored
            } else {
                DeltaSource::Recompute
            };
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.league.trim().is_empty() {
        return Err(anyhow!("League name cannot be empty"));
    }

    config.rating.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.service.league, "default");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_league_rejected() {
        let mut config = AppConfig::default();
        config.service.league = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [rating]
            k_factor = 24.0
            delta_source = "trust_stored"
            "#,
        )
        .unwrap();

        assert_eq!(config.rating.k_factor, 24.0);
        assert_eq!(config.rating.monthly_k_factor, 32.0);
        assert_eq!(config.rating.delta_source, DeltaSource::TrustStored);
        assert_eq!(config.service.name, "ranking-tracker");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = AppConfig::from_file(Path::new("/nonexistent/ranking-tracker.toml"));
        assert!(result.is_err());
    }
}
