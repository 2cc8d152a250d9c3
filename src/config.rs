//! Configuration management for the FraudLens client

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub poller: PollerConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Scoring service connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the scoring service
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Auto-refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Refresh period for `logs --watch`, in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    6
}

/// Export artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory artifacts are written into
    #[serde(default = "default_export_dir")]
    pub dir: String,
    /// File name prefix shared by all artifacts
    #[serde(default = "default_export_prefix")]
    pub prefix: String,
}

fn default_export_dir() -> String {
    ".".to_string()
}

fn default_export_prefix() -> String {
    "fraudlens".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            poller: PollerConfig {
                interval_secs: default_interval_secs(),
            },
            export: ExportConfig {
                dir: default_export_dir(),
                prefix: default_export_prefix(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.poller.interval_secs, 6);
        assert_eq!(config.export.prefix, "fraudlens");
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://scoring.internal:9000\"\n\n[poller]\n\n[export]\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.api.base_url, "http://scoring.internal:9000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.poller.interval_secs, 6);
        assert_eq!(config.export.dir, ".");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load_from_path("/definitely/not/here.toml").is_err());
    }
}
