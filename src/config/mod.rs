//! Configuration module for SortVis-RS
//!
//! This module handles application configuration:
//! - Playback timing and loop behaviour
//! - Snapshot history bounds
//! - Renderer display options and palette
//!
//! # Config Location
//!
//! The config file is stored in the platform-appropriate location:
//! - **Linux**: `~/.config/sortvis-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/sortvis-rs/config.toml`
//! - **Windows**: `%APPDATA%\sortvis-rs\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use sortvis_rs::config::AppConfig;
//!
//! let mut config = AppConfig::load_or_default();
//! config.playback.loop_playback = true;
//! config.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, SortVisError};
use crate::render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "sortvis-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Largest input the bundled front-ends accept
pub const MAX_INPUT_LEN: usize = 20;

// ==================== Config Directory ====================

/// Get the application config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().ok_or_else(|| {
        SortVisError::Config("Could not determine config directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            SortVisError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== App Config ====================

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub history: HistoryConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;
        self.history.validate()?;
        Ok(())
    }

    /// Load config from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SortVisError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| SortVisError::Config(format!("Failed to parse {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            SortVisError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| SortVisError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SortVisError::Config(format!("Failed to write {:?}: {}", path, e)))?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_config_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }
}
