//! Application Configuration
//! Optional JSON settings file; every field falls back to a default.

use crate::currency::Currency;
use crate::rates::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
    pub cache_history: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: Some(30),
            cache_history: true,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Lock one data unit on x (a day) to one data unit on y
    pub equal_aspect: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { equal_aspect: true }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub default_from: Currency,
    pub default_to: Currency,
    pub chart: ChartConfig,
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            default_from: Currency::USD,
            default_to: Currency::EUR,
            chart: ChartConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default location. Never fails: a missing or broken file
    /// yields the defaults.
    pub fn load_or_default() -> Self {
        let path = match Self::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "No config directory, using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Ignoring config file, using defaults");
                Self::default()
            }
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "fx_converter")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(?config, "Parsed config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let file = write_config("{}");
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.provider.base_url, "https://api.frankfurter.dev/v1");
        assert_eq!(config.provider.timeout(), Some(Duration::from_secs(30)));
        assert!(config.chart.equal_aspect);
    }

    #[test]
    fn test_partial_config() {
        let file = write_config(
            r#"{
                "provider": { "base_url": "http://localhost:8080", "timeout_secs": null },
                "default_from": "GBP",
                "chart": { "equal_aspect": false }
            }"#,
        );
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.timeout(), None);
        assert!(config.provider.cache_history);
        assert_eq!(config.default_from, Currency::GBP);
        assert_eq!(config.default_to, Currency::EUR);
        assert!(!config.chart.equal_aspect);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let file = write_config(r#"{ "default_to": "XAU" }"#);
        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }
}
