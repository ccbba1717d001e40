//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::collections::BTreeMap;

use crate::infrastructure::config::server::ServerConfig;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::upstream::UpstreamConfig;

/// Ephemeral loopback port with short timeouts.
pub fn server() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        read_timeout_ms: 200,
        request_deadline_ms: 2_000,
        max_frame_bytes: 64 * 1024,
        max_connections: 0,
    }
}

/// Upstream pointing every listed realm at `endpoint`, effectively unpaced.
pub fn upstream(endpoint: &str, realms: &[&str]) -> UpstreamConfig {
    UpstreamConfig {
        application_id: Some("test-app".into()),
        rate_limit: 1_000,
        max_in_flight: 0,
        timeout_ms: 1_000,
        connect_timeout_ms: 500,
        realms: realms
            .iter()
            .map(|realm| ((*realm).to_string(), endpoint.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Full config combining [`server`] and [`upstream`].
pub fn config(endpoint: &str, realms: &[&str]) -> Config {
    Config {
        server: server(),
        upstream: upstream(endpoint, realms),
        ..Default::default()
    }
}
