//! Listener and framing settings.

use std::time::Duration;

use serde::Deserialize;

const fn default_port() -> u16 {
    9000
}

const fn default_read_timeout_ms() -> u64 {
    5_000
}

const fn default_request_deadline_ms() -> u64 {
    30_000
}

const fn default_max_frame_bytes() -> usize {
    1024 * 1024
}

fn default_host() -> String {
    "127.0.0.1".into()
}

/// TCP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind. Overridden by `SERVER_HOST`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind. Overridden by `SERVER_PORT`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum wait for each part of the request frame, in milliseconds.
    ///
    /// A client that declares a longer payload than it sends is dropped
    /// after this long. Defaults to 5000.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Time budget for rating one batch, in milliseconds.
    ///
    /// Every upstream fetch of the batch shares this deadline; fetches still
    /// running when it passes are reported as transport failures. Defaults
    /// to 30000.
    #[serde(default = "default_request_deadline_ms")]
    pub request_deadline_ms: u64,

    /// Largest accepted request payload in bytes. Defaults to 1 MiB.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Maximum concurrently served connections; `0` means unbounded.
    #[serde(default)]
    pub max_connections: usize,
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    #[must_use]
    pub const fn request_deadline(&self) -> Duration {
        Duration::from_millis(self.request_deadline_ms)
    }

    /// Connection bound as an option, `None` when unbounded.
    #[must_use]
    pub const fn connection_limit(&self) -> Option<usize> {
        if self.max_connections == 0 {
            None
        } else {
            Some(self.max_connections)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            read_timeout_ms: default_read_timeout_ms(),
            request_deadline_ms: default_request_deadline_ms(),
            max_frame_bytes: default_max_frame_bytes(),
            max_connections: 0,
        }
    }
}
