//! Configuration loading.
//!
//! Settings come from a TOML file:
//!
//! ```toml
//! [sources]
//! paths = ["src", "lib"]
//!
//! [log]
//! filter = "info"
//! ```
//!
//! Lookup order: an explicit path, then `.phpantom-reflect.toml` in the
//! working directory, then `phpantom-reflect/config.toml` in the user's
//! configuration directory.  When no file is found the defaults apply.

use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".phpantom-reflect.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sources: SourcesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Files and directories scanned for PHP classes.
    pub paths: Vec<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// A `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file.  Relative source paths are taken relative to
    /// the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content, path)?;

        if let Some(base) = path.parent() {
            for source_path in &mut config.sources.paths {
                if source_path.is_relative() {
                    *source_path = base.join(&*source_path);
                }
            }
        }

        Ok(config)
    }

    /// Load the configuration following the lookup order.
    ///
    /// An explicit path must exist.  The implicit locations are optional,
    /// but a file found there must still parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in Self::default_locations() {
            if candidate.is_file() {
                debug!("using config file {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Ok(strategy) = choose_base_strategy() {
            locations.push(
                strategy
                    .config_dir()
                    .join("phpantom-reflect")
                    .join("config.toml"),
            );
        }
        locations
    }
}
