// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session configuration
//!
//! Configuration is captured once at session start and never re-read
//! mid-session. Changing the box capacity means starting a new session;
//! an in-flight session keeps the capacity it was created with.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("box capacity must be positive, got {0}")]
    InvalidCapacity(u32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Immutable per-session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of items per box
    #[serde(default = "default_capacity")]
    pub box_capacity: u32,
    /// Directory holding the session log artifacts
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory holding the derived export tables
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_capacity() -> u32 {
    12
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("export")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            box_capacity: default_capacity(),
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
        }
    }
}

impl SessionConfig {
    /// Reject configurations no session may be created from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.box_capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.box_capacity));
        }
        Ok(())
    }

    /// Load from a TOML file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
