//! Scenario configuration.
//!
//! A scenario is a JSON document; every field is optional and falls back to
//! the defaults below.
//!
//! ```json
//! {
//!   "factions": ["red", "green", "blue"],
//!   "knockout": true,
//!   "board": { "rows": 8, "columns": 8, "emptiness": 0.25 }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::EngineConfig;
use crate::topology::is_valid_emptiness;

/// Error loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read scenario config from {path:?}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The contents are not valid scenario JSON.
    #[error("failed to parse scenario config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The contents parsed but describe an unusable scenario.
    #[error("invalid scenario config: {0}")]
    Invalid(String),
}

/// Board generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board height.
    pub rows: usize,
    /// Board width.
    pub columns: usize,
    /// Probability that a cell is water.
    pub emptiness: f64,
    /// Layouts to draw before giving up.
    pub max_attempts: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            emptiness: 0.2,
            max_attempts: 64,
        }
    }
}

/// A complete game scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Faction identities in turn order.
    pub factions: Vec<String>,
    /// Eliminate factions that lose every island.
    pub knockout: bool,
    /// Population added by one claim.
    pub grow_by: u32,
    /// Cap on balance steps run after each claim.
    pub max_shift_steps: u32,
    /// Board generation parameters.
    pub board: BoardConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            factions: vec![String::from("red"), String::from("green")],
            knockout: false,
            grow_by: 1,
            max_shift_steps: 256,
            board: BoardConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parse a scenario from JSON without validating it.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read, parse and validate a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, malformed or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), factions = config.factions.len(), "config.loaded");
        Ok(config)
    }

    /// Check that the scenario describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factions.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "at least two factions are required, got {}",
                self.factions.len()
            )));
        }
        if self.board.rows == 0 || self.board.columns == 0 {
            return Err(ConfigError::Invalid(format!(
                "board dimensions must be positive, got {}x{}",
                self.board.rows, self.board.columns
            )));
        }
        if !is_valid_emptiness(self.board.emptiness) {
            return Err(ConfigError::Invalid(format!(
                "emptiness must be in [0, 1), got {}",
                self.board.emptiness
            )));
        }
        if self.board.max_attempts == 0 {
            return Err(ConfigError::Invalid(String::from(
                "max_attempts must be at least 1",
            )));
        }
        if self.grow_by == 0 {
            return Err(ConfigError::Invalid(String::from("grow_by must be at least 1")));
        }
        Ok(())
    }

    /// The engine-level part of this scenario.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            factions: self.factions.clone(),
            knockout: self.knockout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScenarioConfig::default();
        assert_eq!(config.factions, vec!["red", "green"]);
        assert!(!config.knockout);
        assert_eq!(config.grow_by, 1);
        assert_eq!(config.board.rows, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ScenarioConfig::from_json_str(r#"{"knockout": true, "board": {"rows": 4}}"#).unwrap();
        assert!(config.knockout);
        assert_eq!(config.board.rows, 4);
        assert_eq!(config.board.columns, 10);
        assert_eq!(config.factions.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"factions": ["a", "b", "c"], "grow_by": 2}}"#).unwrap();

        let config = ScenarioConfig::load(file.path()).unwrap();
        assert_eq!(config.factions, vec!["a", "b", "c"]);
        assert_eq!(config.grow_by, 2);

        let engine = config.engine_config();
        assert_eq!(engine.factions.len(), 3);
        assert!(!engine.knockout);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"factions": ["solo"]}}"#).unwrap();
        assert!(matches!(
            ScenarioConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_reports_parse_and_read_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ScenarioConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ScenarioConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_validate_board() {
        let mut config = ScenarioConfig::default();
        config.board.emptiness = 1.0;
        assert!(config.validate().is_err());

        config.board.emptiness = 0.5;
        config.board.columns = 0;
        assert!(config.validate().is_err());

        config.board.columns = 3;
        config.board.max_attempts = 0;
        assert!(config.validate().is_err());
    }
}
