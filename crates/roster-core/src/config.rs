//! Configuration types.
//!
//! Configuration lives in `~/.config/roster/config.toml` (or the platform
//! config dir). Every field has a default, so a missing file is not an
//! error and a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::query::DEFAULT_PAGE_SIZE;

/// Endpoint used when neither config nor flags name one.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// What a failed fetch does to the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Leave the store empty and surface the error message.
    #[default]
    Error,
    /// Substitute the built-in dataset and carry on quietly.
    Fallback,
}

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Users endpoint (GET, JSON array).
    pub endpoint: String,

    /// Request timeout for the fetch.
    pub fetch_timeout_ms: u64,

    /// Behaviour when the fetch fails.
    pub on_fetch_error: FetchFailurePolicy,

    /// Quiet period before typed search text takes effect.
    pub search_debounce_ms: u64,

    /// Pause between the "generating" toast and writing the export.
    pub export_delay_ms: u64,

    /// Rows per page.
    pub page_size: NonZeroUsize,

    /// Where exports are written. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fetch_timeout_ms: 10_000,
            on_fetch_error: FetchFailurePolicy::Error,
            search_debounce_ms: 300,
            export_delay_ms: 150,
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: None,
        }
    }
}

impl AppConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn export_delay(&self) -> Duration {
        Duration::from_millis(self.export_delay_ms)
    }

    /// Parse TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text, path)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "endpoint",
                message: "must not be empty".to_string(),
            });
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "fetch_timeout_ms",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("roster"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Get the path to the persisted view preferences.
pub fn preferences_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("preferences.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.page_size.get(), 5);
        assert_eq!(config.on_fetch_error, FetchFailurePolicy::Error);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            endpoint = "http://localhost:8080/api/users"
            on_fetch_error = "fallback"
            page_size = 10
        "#;
        let config = AppConfig::from_toml(text, Path::new("config.toml")).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/api/users");
        assert_eq!(config.on_fetch_error, FetchFailurePolicy::Fallback);
        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = AppConfig::from_toml("page_size = 0", Path::new("config.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let result = AppConfig::from_toml(r#"endpoint = " ""#, Path::new("config.toml"));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "endpoint",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_debounce_ms = 50\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search_debounce(), Duration::from_millis(50));
    }
}
