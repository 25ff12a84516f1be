//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server URL
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Persisted session from the last login, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Persisted session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token
    pub token: String,

    /// Logged-in user id
    pub user_id: String,

    /// Account email, for the prompt
    pub email: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".campusnet").join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Store the session after a successful login or registration.
    pub fn set_session(&mut self, token: String, user_id: String, email: String) {
        self.session = Some(Session {
            token,
            user_id,
            email,
        });
    }

    /// Forget the stored session.
    pub fn clear_session(&mut self) {
        self.session = None;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            session: None,
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert!(config.session.is_none());
        assert!(config.settings.color);
    }

    #[test]
    fn test_session_roundtrip() {
        let mut config = Config::default();
        config.set_session("tok".into(), "uid".into(), "an@campus.edu".into());

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        let session = parsed.session.unwrap();
        assert_eq!(session.token, "tok");
        assert_eq!(session.email, "an@campus.edu");
    }

    #[test]
    fn test_clear_session() {
        let mut config = Config::default();
        config.set_session("tok".into(), "uid".into(), "a@b.c".into());
        config.clear_session();
        assert!(config.session.is_none());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.server_url, "http://localhost:8080");
        assert_eq!(parsed.settings.history_size, 1000);
    }
}
