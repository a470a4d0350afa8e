// Ranking settings
// Loaded from ~/.config/clientrank/settings.toml

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use clientrank_engine::{ScoringOptions, WeightVector};

/// Most decimals a report may ask for.
pub const MAX_DECIMALS: usize = 6;

#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse / deserialization error.
    Parse(String),
    /// Values parsed but are out of range.
    Validation(String),
    /// Reading the file failed.
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Detail table rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Rows shown in the detail table; 0 shows all.
    pub top: usize,
    pub decimals: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { top: 0, decimals: 2 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub weights: WeightVector,
    pub scoring: ScoringOptions,
    pub report: ReportSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clientrank");
        config_dir.join("settings.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Same rules the scorer applies, reported against the file
        self.weights
            .normalized()
            .map_err(|e| ConfigError::Validation(format!("[weights] {e}")))?;

        let offset = self.scoring.boundary_offset;
        if !offset.is_finite() || offset < 0.0 {
            return Err(ConfigError::Validation(format!(
                "[scoring] boundary_offset must be a finite number >= 0, got {offset}"
            )));
        }

        if self.report.decimals > MAX_DECIMALS {
            return Err(ConfigError::Validation(format!(
                "[report] decimals must be at most {MAX_DECIMALS}, got {}",
                self.report.decimals
            )));
        }

        Ok(())
    }

    /// Load an explicit settings file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Load the default settings file, falling back to defaults when absent.
    /// Also returns the path actually read, `None` when defaults were used.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_or_default(&Self::config_path())
    }

    pub fn load_or_default(path: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok((Self::default(), None));
        }
        log::debug!("loading settings from {}", path.display());
        Ok((Self::load_from(path)?, Some(path.to_path_buf())))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
