//! Configuration module for the migration assistant.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and a builder-free plain-struct
//! style, trimmed to this core's actual concerns: where the state store
//! lives, how long a collaborator call may take, and how logging behaves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the migration assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub collaborators: CollaboratorConfig,
    pub logging: LoggingConfig,
}

/// State store (C1) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file. Implementation-chosen; defaults to
    /// an OS-scoped user-data directory.
    pub db_path: PathBuf,
}

/// Collaborator (C4/C5) boundary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    /// Seconds to wait on a single C4/C5 call before treating it as
    /// `collaborator_unavailable`. Defaults to a 60-second collaborator timeout.
    pub timeout_secs: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Optional path to a log file. `None` logs to stderr only.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    ///
    /// # Errors
    /// Returns an error if `path` cannot be read or does not parse as valid
    /// configuration YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file:
    /// `$XDG_CONFIG_HOME/migration-assistant/config.yaml` on Linux.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("migration-assistant")
            .join("config.yaml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            collaborators: CollaboratorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("~/.local/share"))
                .join("migration-assistant")
                .join("migration.db"),
        }
    }
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"collaborators.timeout_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.collaborators.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "collaborators.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "must be one of {:?}, got {:?}",
                    VALID_LOG_LEVELS, self.logging.level
                ),
            });
        }

        if let Some(parent) = self.store.db_path.parent() {
            if parent.as_os_str().is_empty() {
                errors.push(ValidationError {
                    field: "store.db_path".into(),
                    message: "must not be empty".into(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.collaborators.timeout_secs = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "collaborators.timeout_secs");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "logging.level"));
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/path/config.yaml"));
        assert_eq!(config.logging.level, "info");
    }
}
