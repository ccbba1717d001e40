use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to load environment file: {0}")]
    EnvFile(#[source] dotenvy::Error),
}

/// Errors raised while loading the expected-values baseline.
#[derive(Error, Debug)]
pub enum BaselineError {
    #[error("failed to read baseline file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse baseline: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Framing errors on the client socket. All of them are connection-fatal.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("frame of {len} bytes exceeds limit of {max} bytes")]
    TooLarge { len: usize, max: usize },

    #[error("timed out after {0:?} waiting for frame bytes")]
    Timeout(Duration),

    #[error("frame I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Baseline(#[from] BaselineError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
