//! Rule configuration loading.
//!
//! Options can be written in TOML; any key left out keeps its default.
//!
//! ```toml
//! castling = "safe_passage"
//! stalemate = "unresolved"
//! ```

use super::{CastlingRule, StalemateRule};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a rule configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read rule config: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML or names an unknown option.
    #[error("failed to parse rule config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Rule options for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    pub castling: CastlingRule,
    pub stalemate: StalemateRule,
}

impl RuleConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
