//! Configuration management for SmartShopr
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    API_BASE_URL, CONFIG_GENERATED, DEFAULT_API_KEY_ENV, REQUEST_TIMEOUT_MAX_SECS, REQUEST_TIMEOUT_SECS,
    SCAN_INTERVAL_MAX_SECS, SCAN_INTERVAL_MIN_SECS, SCAN_INTERVAL_SECS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin and routing prefix of the API
    pub base_url: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Polling interval in seconds
    pub scan_interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// One of off, error, warn, info, debug, trace
    pub level: String,
    /// Mirror log lines to stderr
    pub stderr: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: SCAN_INTERVAL_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            stderr: false,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SyncConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("smartshopr.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(self.api.base_url.starts_with("https://") || self.api.base_url.starts_with("http://")) {
            anyhow::bail!("base_url must start with http:// or https://, got '{}'", self.api.base_url);
        }

        if self.api.api_key_env.trim().is_empty() {
            anyhow::bail!("api_key_env cannot be empty");
        }

        if self.api.request_timeout_secs == 0 || self.api.request_timeout_secs > REQUEST_TIMEOUT_MAX_SECS {
            anyhow::bail!(
                "request_timeout_secs must be between 1 and {}, got {}",
                REQUEST_TIMEOUT_MAX_SECS,
                self.api.request_timeout_secs
            );
        }

        if self.sync.scan_interval_secs < SCAN_INTERVAL_MIN_SECS || self.sync.scan_interval_secs > SCAN_INTERVAL_MAX_SECS {
            anyhow::bail!(
                "scan_interval_secs must be between {} and {} seconds, got {}",
                SCAN_INTERVAL_MIN_SECS,
                SCAN_INTERVAL_MAX_SECS,
                self.sync.scan_interval_secs
            );
        }

        crate::logger::parse_level(&self.logging.level)?;

        Ok(())
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api.api_key_env)
            .with_context(|| format!("Environment variable '{}' is not set", self.api.api_key_env))?;
        if key.trim().is_empty() {
            anyhow::bail!("Environment variable '{}' is empty", self.api.api_key_env);
        }
        Ok(key)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# SmartShopr Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("smartshopr"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
