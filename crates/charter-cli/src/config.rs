//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! an empty file and no file at all are equivalent.
//!
//! ```yaml
//! output: text
//! seats:
//!   sejm: 460
//!   senate: 100
//! ```
//!
//! Seat overrides feed the defaults of `charter majority` and
//! `charter quorum` for what-if analysis. The procedure machines always use
//! the constitutional seat counts.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use charter_core::{Chamber, SEJM_SEATS, SENATE_SEATS};

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

/// Statutory seat counts (Art. 96(1), 97(1)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seats {
    /// Deputies.
    pub sejm: u64,
    /// Senators.
    pub senate: u64,
}

impl Default for Seats {
    fn default() -> Self {
        Self {
            sejm: SEJM_SEATS,
            senate: SENATE_SEATS,
        }
    }
}

impl Seats {
    /// Seat count of `chamber`; the Electorate has none.
    pub fn of(&self, chamber: Chamber) -> Option<u64> {
        match chamber {
            Chamber::Sejm => Some(self.sejm),
            Chamber::Senate => Some(self.senate),
            Chamber::Electorate => None,
        }
    }
}

/// Contents of the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Output format.
    pub output: OutputFormat,
    /// Seat counts used as CLI defaults.
    pub seats: Seats,
}

impl CliConfig {
    /// Load the file at `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing config {}", path.display()))?
        };
        ensure!(
            config.seats.sejm > 0 && config.seats.senate > 0,
            "seat counts in {} must be positive",
            path.display()
        );
        tracing::debug!(
            path = %path.display(),
            output = ?config.output,
            sejm = config.seats.sejm,
            senate = config.seats.senate,
            "configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.seats.of(Chamber::Sejm), Some(460));
        assert_eq!(config.seats.of(Chamber::Electorate), None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charter.yaml");
        std::fs::write(&path, "output: text\nseats:\n  sejm: 500\n").unwrap();
        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.seats.sejm, 500);
        assert_eq!(config.seats.senate, 100);
    }

    #[test]
    fn empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charter.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(CliConfig::load(Some(&path)).unwrap(), CliConfig::default());
    }

    #[test]
    fn rejects_unknown_keys_and_zero_seats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charter.yaml");
        std::fs::write(&path, "colour: blue\n").unwrap();
        assert!(CliConfig::load(Some(&path)).is_err());
        std::fs::write(&path, "seats:\n  senate: 0\n").unwrap();
        assert!(CliConfig::load(Some(&path)).is_err());
    }
}
