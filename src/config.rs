//! Application configuration loaded from YAML.
//!
//! Every section has defaults, so an empty document yields a usable
//! configuration:
//!
//! ```yaml
//! log:
//!   filter: info
//! storage:
//!   local_root: ./projects
//! executor:
//!   max_concurrency: 4
//!   queue_capacity: 64
//!   ansible_playbook_bin: ansible-playbook
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML for [`AppConfig`].
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Logging settings.
    pub log: LogConfig,
    /// Project storage settings.
    pub storage: StorageConfig,
    /// Task executor settings.
    pub executor: ExecutorConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

/// Project storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Root directory of the local storage backend.
    pub local_root: Utf8PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_root: Utf8PathBuf::from("./projects"),
        }
    }
}

/// Task executor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Number of tasks run at the same time.
    pub max_concurrency: usize,
    /// Number of admitted tasks that may wait for a slot.
    pub queue_capacity: usize,
    /// Binary used for `ansible-playbook` tasks.
    pub ansible_playbook_bin: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            queue_capacity: 64,
            ansible_playbook_bin: "ansible-playbook".to_owned(),
        }
    }
}

impl AppConfig {
    /// Parses and validates a YAML document. Blank input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or unknown keys, and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`AppConfig::from_yaml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.executor.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "executor.max_concurrency must be at least 1".to_owned(),
            ));
        }
        if self.executor.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "executor.queue_capacity must be at least 1".to_owned(),
            ));
        }
        if self.executor.ansible_playbook_bin.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "executor.ansible_playbook_bin must not be empty".to_owned(),
            ));
        }
        if self.storage.local_root.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.local_root must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
