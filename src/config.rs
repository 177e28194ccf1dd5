//! Startup configuration
//!
//! Read once from a TOML file before anything else starts. Every key is optional;
//! a missing file means all defaults.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "GAMEPAD_MAP_CONFIG";
const APP_DIR: &str = "gamepad-map";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid log level '{0}'")]
    LogLevel(String),
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct MapperConfig {
    /// Directory holding the `event*` input nodes
    pub input_dir: PathBuf,
    /// Framebuffer device to draw on
    pub framebuffer: PathBuf,
    /// Top of the export directory browser. The browser never goes above it.
    pub export_root: PathBuf,
    pub log_level: String,
    /// Show a confirmation screen after saving instead of returning to review
    pub confirm_after_save: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("/dev/input"),
            framebuffer: PathBuf::from("/dev/fb0"),
            export_root: PathBuf::from("/mnt"),
            log_level: "info".to_string(),
            confirm_after_save: false,
        }
    }
}

impl MapperConfig {
    /// Loads the config from `$GAMEPAD_MAP_CONFIG` or the user config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
