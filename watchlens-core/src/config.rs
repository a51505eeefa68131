//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/watchlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/watchlens/` (~/.config/watchlens/)
//! - State/Logs: `$XDG_STATE_HOME/watchlens/` (~/.local/state/watchlens/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// History file defaults
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// History file configuration
#[derive(Debug, Deserialize, Default)]
pub struct HistoryConfig {
    /// Default history file to load when none is given on the command line
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/watchlens/config.toml` (~/.config/watchlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("watchlens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/watchlens/` (~/.local/state/watchlens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("watchlens")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/watchlens/watchlens.log` (~/.local/state/watchlens/watchlens.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("watchlens.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.history.path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[history]
path = "/home/me/Takeout/watch-history.json"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.history.path.as_deref(),
            Some(std::path::Path::new("/home/me/Takeout/watch-history.json"))
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_missing_file_is_config_error() {
        let path = PathBuf::from("/nonexistent/watchlens-config.toml");
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
