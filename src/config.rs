//! Application configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! [store]
//! database_url = "postgres://localhost/taskflow"
//! max_connections = 8
//! connection_timeout_secs = 10
//!
//! [kanban]
//! drop_failure_policy = "rollback"
//!
//! [logging]
//! filter = "taskflow=info"
//! json = false
//! ```

use crate::kanban::DropFailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration document is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskFlowConfig {
    /// Task store settings.
    pub store: StoreConfig,
    /// Kanban board settings.
    pub kanban: KanbanConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl TaskFlowConfig {
    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed or has
    /// unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, or
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Connection settings for the `PostgreSQL` task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Connection string.
    pub database_url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/taskflow".to_owned(),
            max_connections: 8,
            connection_timeout_secs: 10,
        }
    }
}

/// Kanban board behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KanbanConfig {
    /// What happens to an optimistic move when the store rejects it.
    pub drop_failure_policy: DropFailurePolicy,
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "taskflow=info".to_owned(),
            json: false,
        }
    }
}
