//! Configuration management for portfolio-term
//!
//! Supports configuration via:
//! 1. Config file (~/.config/portfolio-term/config.toml)
//! 2. Environment variables (PORTFOLIO_TERM_STATE, PORTFOLIO_TERM_NO_ANIMATION)
//! 3. CLI arguments (override file/env settings)

use crate::content::GREETING;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Header, prompt and greeting text
    pub terminal: TerminalSettings,

    /// Output reveal timing
    pub animation: AnimationSettings,

    /// Where session state is kept
    pub storage: StorageSettings,
}

/// Terminal chrome settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// First header line
    pub title: String,

    /// Second header line
    pub system_line: String,

    /// User shown in the prompt
    pub user: String,

    /// Host shown in the prompt
    pub host: String,

    /// Output of the first transcript entry
    pub greeting: String,

    /// Emit OSC 8 hyperlinks for emails, URLs and phone numbers
    pub hyperlinks: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            title: "Jordan Avery - Portfolio v1.0.0".to_string(),
            system_line: "System: Linux portfolio 5.15.0".to_string(),
            user: "guest".to_string(),
            host: "portfolio".to_string(),
            greeting: GREETING.to_string(),
            hyperlinks: true,
        }
    }
}

/// Output animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Reveal output one character at a time
    pub enabled: bool,

    /// Milliseconds between revealed characters
    pub char_interval_ms: u64,

    /// Milliseconds before a response starts appearing
    pub start_delay_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            char_interval_ms: 20,
            start_delay_ms: 100,
        }
    }
}

impl AnimationSettings {
    pub fn char_interval(&self) -> Duration {
        Duration::from_millis(self.char_interval_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// State file path (defaults to the platform data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portfolio-term")
            .join("config.toml")
    }

    /// Default location of the state file
    pub fn default_state_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portfolio-term")
            .join("state.json")
    }

    /// Load config from specific path
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("PORTFOLIO_TERM_STATE") {
            if !path.is_empty() {
                self.storage.state_file = Some(PathBuf::from(path));
            }
        }
        if let Ok(value) = std::env::var("PORTFOLIO_TERM_NO_ANIMATION") {
            if matches!(value.to_lowercase().as_str(), "1" | "true" | "yes") {
                self.animation.enabled = false;
            }
        }
        self
    }

    /// Resolved state file path
    pub fn state_path(&self) -> PathBuf {
        self.storage
            .state_file
            .clone()
            .unwrap_or_else(Self::default_state_path)
    }

    /// Save config to specific path
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Write the default config to `path`, refusing to overwrite unless `force`
    pub fn init_at(path: PathBuf, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path));
        }
        Self::default().save_to(path)
    }
}

/// Builder for creating Config programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.terminal.title = title.into();
        self
    }

    pub fn prompt(mut self, user: impl Into<String>, host: impl Into<String>) -> Self {
        self.config.terminal.user = user.into();
        self.config.terminal.host = host.into();
        self
    }

    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.config.terminal.greeting = greeting.into();
        self
    }

    pub fn hyperlinks(mut self, enabled: bool) -> Self {
        self.config.terminal.hyperlinks = enabled;
        self
    }

    pub fn animation(mut self, enabled: bool) -> Self {
        self.config.animation.enabled = enabled;
        self
    }

    pub fn char_interval_ms(mut self, ms: u64) -> Self {
        self.config.animation.char_interval_ms = ms;
        self
    }

    pub fn state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage.state_file = Some(path.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.terminal.user, "guest");
        assert_eq!(config.animation.char_interval(), Duration::from_millis(20));
        assert_eq!(config.animation.start_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .prompt("visitor", "home")
            .animation(false)
            .state_file("/tmp/state.json")
            .build();

        assert_eq!(config.terminal.user, "visitor");
        assert_eq!(config.terminal.host, "home");
        assert!(!config.animation.enabled);
        assert_eq!(config.state_path(), PathBuf::from("/tmp/state.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[animation]\nchar_interval_ms = 5\n").unwrap();
        assert_eq!(config.animation.char_interval_ms, 5);
        assert_eq!(config.animation.start_delay_ms, 100);
        assert_eq!(config.terminal.host, "portfolio");
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::init_at(path.clone(), false).unwrap();
        assert!(matches!(
            Config::init_at(path.clone(), false),
            Err(ConfigError::AlreadyExists(_))
        ));
        Config::init_at(path.clone(), true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[terminal]"));
        assert!(written.contains("[animation]"));

        let loaded = Config::load_from(path).unwrap();
        assert!(loaded.terminal.hyperlinks);
    }
}
