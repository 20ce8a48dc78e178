//! Configuration management for capture-deck.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, per-field defaults, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{NotificationConfig, ObsConfig, SearchConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Capture server connection.
    #[serde(default)]
    pub obs: ObsConfig,
    /// Window search overlay.
    #[serde(default)]
    pub search: SearchConfig,
    /// Desktop notifications.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!(config_path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Read and parse a configuration file.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration text. Missing sections and fields take defaults.
    #[track_caller]
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Platform config file location, creating its directory if needed.
    #[track_caller]
    pub fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "capture-deck", "Capture-Deck").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get config directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}
