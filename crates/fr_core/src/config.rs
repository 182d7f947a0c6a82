//! Registry configuration
//!
//! Loaded from a JSON file. Every field has a default, so an empty object (or
//! no file at all) yields [`RegistryConfig::default`].

use crate::guard::Guard;
use crate::outcome::GuardResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "FR_CONFIG_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSyncConfig {
    /// Create a team's squad on first contract registration instead of
    /// skipping the squad update.
    #[serde(default = "default_true")]
    pub create_missing: bool,
}

impl Default for SquadSyncConfig {
    fn default() -> Self {
        Self { create_missing: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Fill stadium city and country from coordinates.
    #[serde(default = "default_true")]
    pub geocode_stadiums: bool,

    /// Look up coordinates by stadium name when the scraper has none.
    #[serde(default = "default_true")]
    pub search_missing_coordinates: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { geocode_stadiums: true, search_missing_coordinates: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Upper bound on scraped players accepted for one team (default: 60).
    #[serde(default = "default_max_players")]
    pub max_players_per_team: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { max_players_per_team: default_max_players() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub squads: SquadSyncConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub import: ImportConfig,
    /// `tracing` filter directive used by the CLI when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            squads: SquadSyncConfig::default(),
            enrichment: EnrichmentConfig::default(),
            import: ImportConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_players() -> usize {
    60
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl RegistryConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        GuardResult::combine([
            Guard::greater_than(0, self.import.max_players_per_team, "import.max_players_per_team"),
            Guard::against_at_least(1, self.log_filter.trim(), "log_filter"),
        ])
        .into_result()
        .map_err(ConfigError::Invalid)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file named by `FR_CONFIG_PATH`, or defaults when it is unset or blank.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }
        Self::load(Path::new(path))
    }
}
