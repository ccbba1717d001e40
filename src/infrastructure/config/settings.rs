//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is read from an optional TOML file, then the environment
//! variables the service has always honoured are layered on top:
//!
//! | Variable         | Field                       |
//! |------------------|-----------------------------|
//! | `APPLICATION_ID` | `upstream.application_id`   |
//! | `RATE_LIMIT`     | `upstream.rate_limit`       |
//! | `SERVER_HOST`    | `server.host`               |
//! | `SERVER_PORT`    | `server.port`               |
//!
//! # Example
//!
//! ```no_run
//! use prserver::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("prserver.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::error::{ConfigError, Result};

fn default_baseline_path() -> PathBuf {
    PathBuf::from("expected.json")
}

/// Location of the expected-values dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct BaselineConfig {
    /// Path to the expected-values JSON file. Defaults to `expected.json`.
    #[serde(default = "default_baseline_path")]
    pub path: PathBuf,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            path: default_baseline_path(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listener and framing settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Statistics API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Expected-values dataset.
    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an environment
    /// override is malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.finish(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults and environment variables only.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override is malformed or
    /// validation fails.
    pub fn from_env() -> Result<Self> {
        Self::default().finish(|key| std::env::var(key).ok())
    }

    /// Parse and validate TOML content without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed or validation fails.
    pub fn finish<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_overrides(lookup)?;
        self.validate()?;
        Ok(self)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("APPLICATION_ID") {
            self.upstream.application_id = Some(id);
        }
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidValue {
                field: "SERVER_PORT",
                reason: format!("{e}"),
            })?;
        }
        if let Some(rate) = lookup("RATE_LIMIT") {
            self.upstream.rate_limit =
                rate.trim().parse().map_err(|e| ConfigError::InvalidValue {
                    field: "RATE_LIMIT",
                    reason: format!("{e}"),
                })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "host" }.into());
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.server.read_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "read_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.server.request_deadline_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_deadline_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.server.max_frame_bytes == 0 || self.server.max_frame_bytes > u32::MAX as usize {
            return Err(ConfigError::InvalidValue {
                field: "max_frame_bytes",
                reason: "must be between 1 and u32::MAX".to_string(),
            }
            .into());
        }

        if self.upstream.rate_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.upstream.timeout_ms == 0 || self.upstream.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "HTTP timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        if self.upstream.realms.is_empty() {
            return Err(ConfigError::MissingField { field: "realms" }.into());
        }
        for (realm, endpoint) in &self.upstream.realms {
            let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
                field: "realms",
                reason: format!("{realm}: {e}"),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field: "realms",
                    reason: format!("{realm}: unsupported scheme '{}'", url.scheme()),
                }
                .into());
            }
        }

        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// The application id, required before serving requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no id was configured.
    pub fn application_id(&self) -> Result<&str> {
        self.upstream
            .application_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: "APPLICATION_ID",
                }
                .into()
            })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
