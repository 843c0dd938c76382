//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb connection settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
}

/// OMDb connection configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// API key; `OMDB_API_KEY` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override, mainly for pointing at a local mirror.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.omdb.api_key.is_none());
        assert!(config.omdb.base_url.is_none());
    }

    #[test]
    fn test_parse_omdb_section() {
        // Arrange
        let toml_str = "[omdb]\napi_key = \"abc123\"\nbase_url = \"http://127.0.0.1:8080/\"\n";

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.omdb.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.omdb.base_url.as_deref(), Some("http://127.0.0.1:8080/"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            omdb: OmdbConfig {
                api_key: Some(String::from("abc123")),
                base_url: None,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[omdb\napi_key = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }
}
