//! Upstream statistics API settings.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

const fn default_rate_limit() -> u32 {
    10
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

/// Public ships/stats endpoints per realm.
#[must_use]
pub fn default_realms() -> BTreeMap<String, String> {
    [
        ("ASIA", "https://api.worldofwarships.asia/wows/ships/stats/"),
        ("NA", "https://api.worldofwarships.com/wows/ships/stats/"),
        ("EU", "https://api.worldofwarships.eu/wows/ships/stats/"),
        ("RU", "https://api.worldofwarships.ru/wows/ships/stats/"),
    ]
    .into_iter()
    .map(|(realm, url)| (realm.to_string(), url.to_string()))
    .collect()
}

/// Statistics API configuration.
#[derive(Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Application id sent with every request.
    ///
    /// Normally supplied through `APPLICATION_ID` rather than the file.
    #[serde(default)]
    pub application_id: Option<String>,

    /// Process-wide ceiling on upstream calls per second. Overridden by
    /// `RATE_LIMIT`. Defaults to 10.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    /// Maximum concurrent upstream fetches across all connections; `0`
    /// means unbounded.
    #[serde(default)]
    pub max_in_flight: usize,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// HTTP connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Realm name to ships/stats endpoint.
    #[serde(default = "default_realms")]
    pub realms: BTreeMap<String, String>,
}

impl UpstreamConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Process-wide fetch bound as an option, `None` when unbounded.
    #[must_use]
    pub const fn in_flight_limit(&self) -> Option<usize> {
        if self.max_in_flight == 0 {
            None
        } else {
            Some(self.max_in_flight)
        }
    }
}

// Hand-written so the application id never lands in logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field(
                "application_id",
                &self.application_id.as_ref().map(|_| "<redacted>"),
            )
            .field("rate_limit", &self.rate_limit)
            .field("max_in_flight", &self.max_in_flight)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("realms", &self.realms)
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            application_id: None,
            rate_limit: default_rate_limit(),
            max_in_flight: 0,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            realms: default_realms(),
        }
    }
}
