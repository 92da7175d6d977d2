//! watcher.toml configuration parser.
//!
//! Every section and field is optional; anything left out falls back to the
//! compiled-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatcherConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the database files.
    pub data_dir: PathBuf,
    /// Database name; the file on disk is `<data_dir>/<database>.redb`.
    pub database: String,
    /// Collection (table) holding one document per watcher.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/var/lib/watcher"),
            database: "watcher".to_string(),
            collection: "notification".to_string(),
        }
    }
}

/// Allow-lists consulted while validating a new watcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Known namespaces. Only checked when `enforce_namespaces` is set.
    pub namespaces: Vec<String>,
    /// Accepted `status` values on create.
    pub statuses: Vec<String>,
    pub enforce_namespaces: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            namespaces: vec!["tdaf".to_string()],
            statuses: vec!["ACTIVE".to_string(), "PAUSED".to_string()],
            enforce_namespaces: false,
        }
    }
}

impl WatcherConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WatcherConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path of the database file backing the store.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .data_dir
            .join(format!("{}.redb", self.store.database))
    }
}
