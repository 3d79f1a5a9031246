//! Arena configuration, read from a TOML file

use bandit_engine::BanditConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::elo::{DEFAULT_RATING, K_FACTOR};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rating parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub k_factor: f64,
    /// Rating given to newly registered agents
    pub initial_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            initial_rating: DEFAULT_RATING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("arena_store.json"),
        }
    }
}

/// Top-level arena configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub rating: RatingConfig,
    pub bandit: BanditConfig,
    pub store: StoreConfig,
}

impl ArenaConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, or use defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rating.k_factor.is_finite() && self.rating.k_factor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rating.k_factor must be a positive number, got {}",
                self.rating.k_factor
            )));
        }
        if !self.rating.initial_rating.is_finite() {
            return Err(ConfigError::Invalid(
                "rating.initial_rating must be finite".to_string(),
            ));
        }
        self.bandit
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
