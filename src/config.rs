//! Service configuration loaded from TOML.
//!
//! Every section has defaults, so an empty file (or no file) is valid.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:5000"
//!
//! [store]
//! path = "/var/lib/satlog/telemetry.db"
//! busy_timeout_ms = 5000
//!
//! [runtime]
//! queue_bound = 256
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    runtime::handle::RuntimeConfig,
    store::{StoreResult, TelemetryStore, sqlite::SqliteStore},
};

/// Configuration load failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Storage engine.
    pub store: StoreConfig,
    /// Single-writer runtime.
    pub runtime: RuntimeConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Storage engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// Use a private in-memory database instead of `path`.
    pub in_memory: bool,
    /// Lock wait for SQLite writers, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("telemetry.db"),
            in_memory: false,
            busy_timeout_ms: 5_000,
        }
    }
}

impl StoreConfig {
    /// Opens the configured SQLite store, creating the table if needed.
    pub fn open(&self) -> StoreResult<Box<dyn TelemetryStore>> {
        let store = if self.in_memory {
            SqliteStore::open_in_memory()?
        } else {
            SqliteStore::open(&self.path)?
        };
        let store = store.with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))?;
        Ok(Box::new(store))
    }
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
