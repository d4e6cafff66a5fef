//! Configuration loading for the bulkkot binary.
//!
//! The configuration is a flat TOML file in the platform config directory.
//! Every field has a default, so a partial file merges over the defaults
//! and a missing file is not an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bulkkot_core::{EffectKind, FireworksOptions, SnowOptions};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration merged over defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Effect shown at startup.
    pub effect: EffectKind,
    pub fireworks: FireworksOptions,
    pub snow: SnowOptions,
}

impl Config {
    /// Load the user configuration, falling back to defaults when no file
    /// exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and parse a specific configuration file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Path of the user configuration file, if a home directory can be found.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bulkkot").map(|dirs| dirs.config_dir().join("config.toml"))
}
