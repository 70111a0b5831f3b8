//! Configuration handling for regsim
//!
//! Configuration is stored in `config.toml` inside the regsim home
//! directory (`$REGSIM_HOME`, or the platform config directory).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "REGSIM_HOME";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown config key: {0} (expected server_url, timeout_secs, offline or default_format)")]
    UnknownKey(String),
}

/// Default output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for DefaultFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultFormat::Text => write!(f, "text"),
            DefaultFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for DefaultFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(DefaultFormat::Text),
            "json" => Ok(DefaultFormat::Json),
            _ => Err(ConfigError::Invalid(format!("unknown format '{}'", s))),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the registration backend
    pub server_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Never contact the backend; serve demo data
    pub offline: bool,

    /// Output format when `--format` is not given
    pub default_format: DefaultFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            offline: false,
            default_format: DefaultFormat::Text,
        }
    }
}

impl Config {
    /// Resolves the home directory: `$REGSIM_HOME`, then the platform config dir
    pub fn home_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("dev", "regsim", "regsim").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the config file path inside `home`
    pub fn path_in(home: &Path) -> PathBuf {
        home.join(CONFIG_FILE)
    }

    /// Loads configuration from `home`, using defaults if no file exists
    pub fn load_from(home: &Path) -> Result<Self> {
        let config_path = Self::path_in(home);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration into `home`
    pub fn save_to(&self, home: &Path) -> Result<()> {
        fs::create_dir_all(home)
            .with_context(|| format!("Failed to create config directory: {}", home.display()))?;

        let config_path = Self::path_in(home);
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))
    }

    /// Checks values that parse but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "server_url must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Sets a single key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        match key {
            "server_url" => updated.server_url = value.trim_end_matches('/').to_string(),
            "timeout_secs" => {
                updated.timeout_secs = value
                    .parse()
                    .map_err(|_| ConfigError::Invalid(format!("timeout_secs must be a number, got '{}'", value)))?
            }
            "offline" => {
                updated.offline = value
                    .parse()
                    .map_err(|_| ConfigError::Invalid(format!("offline must be true or false, got '{}'", value)))?
            }
            "default_format" => updated.default_format = value.parse()?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.offline);
        assert_eq!(config.default_format, DefaultFormat::Text);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
server_url = "https://reg.example.edu"
default_format = "json"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server_url, "https://reg.example.edu");
        assert_eq!(config.default_format, DefaultFormat::Json);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_from(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set("offline", "true").unwrap();
        config.set("server_url", "https://api.example.edu/").unwrap();
        config.save_to(dir.path()).unwrap();

        let loaded = Config::load_from(dir.path()).unwrap();
        assert!(loaded.offline);
        assert_eq!(loaded.server_url, "https://api.example.edu");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = Config::default();
        assert!(matches!(config.set("color", "red"), Err(ConfigError::UnknownKey(_))));
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.set("timeout_secs", "0").is_err());
        assert!(config.set("server_url", "ftp://x").is_err());
        assert!(config.set("default_format", "yaml").is_err());

        // Failed sets leave the config untouched
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(Config::path_in(dir.path()), "server_url = 3").unwrap();
        assert!(Config::load_from(dir.path()).is_err());
    }
}
