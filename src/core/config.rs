//! Configuration management for Frameact
//!
//! Supports environment variables, config files, and runtime overrides.
//! Every delay in the engine is pacing for observability, not correctness,
//! so all of them are tunable here.
//!
//! Config file location: ~/.config/frameact/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{FrameactError, Result};

/// Main configuration for Frameact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Step pacing and in-action delays
    pub pacing: PacingConfig,
    /// Highlight treatment applied while an element is acted on
    #[serde(default)]
    pub highlight: HighlightConfig,
}

/// Delays driving the highlight/act/restore protocol and step pacing.
/// All values are milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause before each step is dispatched, purely for observability
    pub inter_step_ms: u64,
    /// Pause between applying the highlight and executing the action
    pub highlight_ms: u64,
    /// Pause between executing the action and restoring the element's style
    pub restore_ms: u64,
}

/// Visual treatment applied to the element about to be acted on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// CSS appended on top of the element's current inline style
    pub css: String,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_step_ms: env_ms("FRAMEACT_INTER_STEP_MS", 1500),
            highlight_ms: env_ms("FRAMEACT_HIGHLIGHT_MS", 500),
            restore_ms: env_ms("FRAMEACT_RESTORE_MS", 1000),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            css: env::var("FRAMEACT_HIGHLIGHT_CSS").unwrap_or_else(|_| {
                "border: 3px solid red !important; background-color: yellow !important;"
                    .to_string()
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

/// Read a millisecond tunable from the environment, falling back to `default`
fn env_ms(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PacingConfig {
    /// Inter-step pacing delay
    pub fn inter_step(&self) -> Duration {
        Duration::from_millis(self.inter_step_ms)
    }

    /// Highlight-then-act delay
    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    /// Act-then-restore delay
    pub fn restore(&self) -> Duration {
        Duration::from_millis(self.restore_ms)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("frameact")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(FrameactError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| FrameactError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| FrameactError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| FrameactError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| FrameactError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| FrameactError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// A configuration with all delays collapsed, for tests and dry runs
    pub fn immediate() -> Self {
        Self {
            pacing: PacingConfig {
                inter_step_ms: 0,
                highlight_ms: 0,
                restore_ms: 0,
            },
            highlight: HighlightConfig::default(),
        }
    }
}
