//! Configuration loading, validation, and management for WordWeave.
//!
//! Loads configuration from `~/.wordweave/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.wordweave/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Run construction settings
    #[serde(default)]
    pub exercise: ExerciseConfig,

    /// Drag controller tuning
    #[serde(default)]
    pub drag: DragConfig,

    /// Geometry of the headless board
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Reshuffles tried while a presentation still reads as the word
    #[serde(default = "default_reshuffle_attempts")]
    pub reshuffle_attempts: usize,

    /// Word count used when a caller builds an instance itself
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// JSON word list used when the host sends no words
    #[serde(default = "default_word_list")]
    pub word_list: PathBuf,

    /// Enable live feedback regardless of what the host asks for
    #[serde(default)]
    pub force_easy: bool,
}

fn default_reshuffle_attempts() -> usize {
    25
}
fn default_count() -> usize {
    10
}
fn default_word_list() -> PathBuf {
    PathBuf::from("words.json")
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            reshuffle_attempts: default_reshuffle_attempts(),
            default_count: default_count(),
            word_list: default_word_list(),
            force_easy: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// One pointer-move event in every `move_window` is processed
    #[serde(default = "default_move_window")]
    pub move_window: u32,

    /// Gap between the insertion separator and its neighbouring item, in px
    #[serde(default = "default_separator_margin")]
    pub separator_margin: f64,
}

fn default_move_window() -> u32 {
    9
}
fn default_separator_margin() -> f64 {
    8.0
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            move_window: default_move_window(),
            separator_margin: default_separator_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default)]
    pub tray_top: f64,

    #[serde(default = "default_answer_top")]
    pub answer_top: f64,

    #[serde(default = "default_item_height")]
    pub item_height: f64,

    /// Item width per character of its token
    #[serde(default = "default_char_width")]
    pub char_width: f64,

    #[serde(default = "default_item_gap")]
    pub item_gap: f64,

    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_width() -> f64 {
    800.0
}
fn default_answer_top() -> f64 {
    120.0
}
fn default_item_height() -> f64 {
    48.0
}
fn default_char_width() -> f64 {
    16.0
}
fn default_item_gap() -> f64 {
    8.0
}
fn default_padding() -> f64 {
    12.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            tray_top: 0.0,
            answer_top: default_answer_top(),
            item_height: default_item_height(),
            char_width: default_char_width(),
            item_gap: default_item_gap(),
            padding: default_padding(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.wordweave/config.toml).
    ///
    /// Also checks environment variables:
    /// - `WORDWEAVE_WORD_LIST` — path to the fallback word list
    /// - `WORDWEAVE_EASY` — `1`/`true` forces easy mode
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("WORDWEAVE_WORD_LIST") {
            self.exercise.word_list = PathBuf::from(path);
        }

        if let Some(easy) = lookup("WORDWEAVE_EASY") {
            self.exercise.force_easy = matches!(easy.trim(), "1" | "true" | "yes");
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".wordweave")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.drag.move_window == 0 {
            return Err(ConfigError::ValidationError(
                "drag.move_window must be at least 1".into(),
            ));
        }

        if self.drag.separator_margin < 0.0 {
            return Err(ConfigError::ValidationError(
                "drag.separator_margin must not be negative".into(),
            ));
        }

        if self.layout.answer_top < self.layout.tray_top + self.layout.item_height {
            return Err(ConfigError::ValidationError(
                "layout.answer_top must leave room for the tray row".into(),
            ));
        }

        if self.layout.char_width <= 0.0 || self.layout.item_height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "layout.char_width and layout.item_height must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Serialize this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Generate a default config TOML string (for `init` command).
    pub fn default_toml() -> String {
        Self::default().to_toml().unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}
