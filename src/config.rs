//! Configuration management for the quickdrop client
//!
//! This module provides TOML-backed application configuration with
//! zero-config defaults: with no file present the client talks to the
//! default local server, and an explicit `--config` path that does not
//! exist is an error rather than a silent fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::ClientConfig;
use crate::constants::{endpoints, env as env_constants, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server connection settings
    pub server: ServerConfig,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the upload server
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// TOML-friendly HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// TCP keep-alive in seconds (None = disabled)
    pub tcp_keepalive_secs: Option<u64>,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Maximum connections per host
    pub pool_max_per_host: usize,
    /// Request timeout in seconds; covers the whole upload
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        let runtime = ClientConfig::default();
        Self {
            tcp_keepalive_secs: runtime.tcp_keepalive.map(|d| d.as_secs()),
            tcp_nodelay: runtime.tcp_nodelay,
            pool_idle_timeout_secs: runtime.pool_idle_timeout.map(|d| d.as_secs()),
            pool_max_per_host: runtime.pool_max_per_host,
            request_timeout_secs: runtime.request_timeout.as_secs(),
            connect_timeout_secs: runtime.connect_timeout.as_secs(),
        }
    }
}

impl ClientConfigToml {
    /// Convert TOML-friendly configuration to runtime configuration
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            tcp_keepalive: self.tcp_keepalive_secs.map(Duration::from_secs),
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            pool_max_per_host: self.pool_max_per_host,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if exists)
    ///
    /// An explicit override path must exist; the default location is
    /// optional.
    pub async fn load(config_file_override: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = config_file_override {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_from_file(path).await;
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                return Self::load_from_file(&path).await;
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories
    pub async fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            value: String::new(),
            reason: e.to_string(),
        })?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Default config file location (platform config dir)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quickdrop").join("config.toml"))
    }

    /// Resolve the server base URL
    ///
    /// Precedence: explicit override (CLI flag), then the environment,
    /// then the config file value.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> ConfigResult<url::Url> {
        let raw = if let Some(value) = cli_override {
            value.to_string()
        } else if let Ok(value) = std::env::var(env_constants::SERVER) {
            value
        } else {
            self.server.base_url.clone()
        };

        url::Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
            field: "server.base_url".to_string(),
            value: raw,
            reason: e.to_string(),
        })
    }
}
