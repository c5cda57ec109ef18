//! Application configuration management.
//!
//! Handles loading, saving, and accessing the configuration used to reach a
//! bridge: host, credentials, request timeout, rate limits and logging.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{HueError, HueResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bridge connection settings.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Request pacing settings handed to the transport.
    #[serde(default)]
    pub rate_limits: RateLimits,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bridge connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// IP address or FQDN of the bridge on the local network.
    #[serde(default)]
    pub host: String,

    /// Port override. Defaults to 443, or 80 when `insecure` is set.
    #[serde(default)]
    pub port: Option<u16>,

    /// Connect over plain HTTP instead of HTTPS.
    #[serde(default)]
    pub insecure: bool,

    /// Whitelisted username issued by the bridge.
    #[serde(default)]
    pub username: Option<String>,

    /// Client key for the entertainment API.
    #[serde(default)]
    pub client_key: Option<String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Extra PEM trust root for the bridge certificate.
    #[serde(default)]
    pub ca_certificate: Option<PathBuf>,
}

/// Pacing for one group of requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum requests in flight at once.
    pub max_concurrent: u32,
    /// Minimum spacing between request starts, in milliseconds.
    pub min_time_ms: u64,
}

impl RateLimit {
    pub const fn new(max_concurrent: u32, min_time_ms: u64) -> Self {
        Self {
            max_concurrent,
            min_time_ms,
        }
    }
}

/// Rate limits for the bridge, passed explicitly into each bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Applies to every request the transport issues.
    #[serde(default = "default_transport_limit")]
    pub transport: RateLimit,

    /// Light state changes.
    #[serde(default = "default_lights_limit")]
    pub lights: RateLimit,

    /// Group state changes.
    #[serde(default = "default_groups_limit")]
    pub groups: RateLimit,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_transport_limit() -> RateLimit {
    RateLimit::new(50, 50)
}

fn default_lights_limit() -> RateLimit {
    RateLimit::new(1, 100)
}

fn default_groups_limit() -> RateLimit {
    RateLimit::new(1, 1000)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            insecure: false,
            username: None,
            client_key: None,
            timeout_ms: default_timeout(),
            ca_certificate: None,
        }
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            transport: default_transport_limit(),
            lights: default_lights_limit(),
            groups: default_groups_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl BridgeConfig {
    /// The configured timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The port that will actually be dialed.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.insecure {
            constants::HTTP_PORT
        } else {
            constants::HTTPS_PORT
        })
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> HueResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> HueResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> HueResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| HueError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> HueResult<PathBuf> {
        Ok(Platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> HueResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether a bridge host is configured.
    pub fn is_bridge_configured(&self) -> bool {
        !self.bridge.host.trim().is_empty()
    }
}
