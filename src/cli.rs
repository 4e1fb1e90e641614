//! CLI command implementations for Influence.

pub(crate) mod generate;
pub(crate) mod play;
pub(crate) mod survey;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

use influence::{ConfigError, Coord, EngineError, MapGenError, TopologyError};

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {e}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<MapGenError> for CliError {
    fn from(e: MapGenError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<TopologyError> for CliError {
    fn from(e: TopologyError) -> Self {
        Self::new(e.to_string())
    }
}

/// Parse a `row,column` pair.
pub(crate) fn parse_coord(text: &str) -> Result<Coord, String> {
    let (row, column) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `row,column`, got `{text}`"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("bad row `{row}`: {e}"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|e| format!("bad column `{column}`: {e}"))?;
    Ok(Coord::new(row, column))
}

/// Seed from the clock when none was given.
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Ok(Coord::new(3, 4)));
        assert_eq!(parse_coord(" 0 , -1 "), Ok(Coord::new(0, -1)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a,1").is_err());
    }

    #[test]
    fn test_seed_passthrough() {
        assert_eq!(seed_or_now(Some(7)), 7);
    }
}
