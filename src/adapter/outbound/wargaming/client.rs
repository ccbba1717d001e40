//! Wargaming REST client.
//!
//! One form-encoded `POST` per account against the realm's `ships/stats`
//! endpoint, requesting only the random-battle (`pvp_solo`) counters the
//! scorer needs. No retries: a failed call becomes a transport failure for
//! that player.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::ShipsStatsResponse;
use crate::domain::ShipStats;
use crate::infrastructure::config::upstream::UpstreamConfig;
use crate::port::outbound::stats::{StatsError, StatsSource};

const FIELDS: &str =
    "ship_id, pvp_solo.wins, pvp_solo.damage_dealt, pvp_solo.battles, pvp_solo.frags";

/// HTTP client for the per-realm `ships/stats` endpoints.
pub struct WargamingClient {
    http: HttpClient,
    application_id: String,
    /// Realm name to endpoint URL.
    realms: BTreeMap<String, String>,
}

impl WargamingClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(application_id: impl Into<String>, realms: BTreeMap<String, String>) -> Self {
        Self {
            http: HttpClient::new(),
            application_id: application_id.into(),
            realms,
        }
    }

    #[must_use]
    pub fn from_config(config: &UpstreamConfig, application_id: &str) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            application_id: application_id.to_string(),
            realms: config.realms.clone(),
        }
    }

    fn endpoint(&self, realm: &str) -> Result<&str, StatsError> {
        self.realms
            .get(realm)
            .map(String::as_str)
            .ok_or_else(|| StatsError::UnknownRealm(realm.to_string()))
    }
}

#[async_trait]
impl StatsSource for WargamingClient {
    async fn fetch(&self, realm: &str, account_id: u64) -> Result<Vec<ShipStats>, StatsError> {
        let endpoint = self.endpoint(realm)?;
        let account = account_id.to_string();
        let form = [
            ("application_id", self.application_id.as_str()),
            ("account_id", account.as_str()),
            ("extra", "pvp_solo"),
            ("fields", FIELDS),
            ("in_garage", "0"),
            ("language", "en"),
        ];

        debug!(realm, account_id, "Fetching ship statistics");

        let response = self.http.post(endpoint).form(&form).send().await?;
        let body: ShipsStatsResponse = response.json().await?;

        if let Some(error) = &body.error {
            debug!(
                realm,
                account_id,
                code = error.code,
                message = %error.message,
                field = error.field.as_deref().unwrap_or_default(),
                value = error.value.as_deref().unwrap_or_default(),
                "Upstream returned an error"
            );
        }

        body.into_ships(account_id)
    }

    fn source_name(&self) -> &'static str {
        "Wargaming"
    }
}
