//! Session configuration and its persisted store
//!
//! The `{port, token}` pair is owned by the operator. A read-only snapshot is
//! handed to the server at start time; later edits only take effect on the
//! next start.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default port the phone connects to
pub const DEFAULT_PORT: u16 = 5000;

/// The operator-controlled pairing session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Pairing token embedded in the QR-coded URL. Empty means "not yet
    /// generated"; callers must fill it before starting a server.
    #[serde(default)]
    pub token: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            token: String::new(),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder pattern: set token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }
}

/// File-backed store for [`SessionConfig`]
///
/// Uses JSON storage in ~/.config/scanlink/config.json. A missing or
/// unreadable file yields defaults; persistence problems are never fatal.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store at the default path (~/.config/scanlink/config.json)
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Self::default_path()?,
        })
    }

    /// Create a store at a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the underlying config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("configuration directory not found".to_string()))?;
        Ok(config_dir.join("scanlink").join("config.json"))
    }

    /// Load the persisted configuration, falling back to defaults
    pub fn load(&self) -> SessionConfig {
        if !self.path.exists() {
            debug!("No existing config at {:?}, using defaults", self.path);
            return SessionConfig::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded config from {:?}", self.path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config, using defaults: {}", e);
                    SessionConfig::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config, using defaults: {}", e);
                SessionConfig::default()
            }
        }
    }

    /// Persist the configuration to disk
    pub fn save(&self, config: &SessionConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json)?;
        debug!("Saved config to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::with_path(dir.path().join("config.json"));

        let config = SessionConfig::new().with_port(8080).with_token("abc123");
        store.save(&config).unwrap();

        assert_eq!(store.load(), config);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::with_path(dir.path().join("nope.json"));

        let config = store.load();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = ConfigStore::with_path(path);
        assert_eq!(store.load(), SessionConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"token":"tok"}"#).unwrap();

        let store = ConfigStore::with_path(path);
        let config = store.load();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token, "tok");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::with_path(dir.path().join("deep").join("config.json"));
        store.save(&SessionConfig::default()).unwrap();
        assert!(store.path().exists());
    }
}
