//! Wargaming `ships/stats` response types.
//!
//! Example response:
//! ```json
//! {
//!   "status": "ok",
//!   "meta": {"count": 1, "hidden": null},
//!   "data": {"500123456": [{"ship_id": 4179539408, "pvp_solo": {"battles": 12, ...}}]}
//! }
//! ```
//!
//! Account ids arrive as string map keys. A hidden profile lists the account
//! under `meta.hidden`; an unknown account maps to `null`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::ShipStats;
use crate::port::outbound::stats::StatsError;

#[derive(Debug, Deserialize)]
pub struct ShipsStatsResponse {
    pub status: String,
    #[serde(default)]
    pub meta: ResponseMeta,
    #[serde(default)]
    pub data: Option<HashMap<u64, Option<Vec<ShipEntry>>>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub hidden: Option<Vec<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct ShipEntry {
    pub ship_id: u64,
    #[serde(default)]
    pub pvp_solo: Option<SoloStats>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SoloStats {
    #[serde(default)]
    pub damage_dealt: u64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub frags: u32,
    #[serde(default)]
    pub battles: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub value: Option<String>,
}

impl ShipsStatsResponse {
    /// Extract the ships of `account_id`, classifying upstream failures.
    ///
    /// Checks run in order: API error status, hidden profile, empty data.
    /// An account present with a `null` ship list yields an empty list and
    /// is left for scoring to reject.
    pub fn into_ships(self, account_id: u64) -> Result<Vec<ShipStats>, StatsError> {
        if self.status == "error" {
            let error = self.error.unwrap_or_default();
            return Err(StatsError::Api {
                code: error.code,
                message: error.message,
            });
        }

        if self.meta.hidden.is_some() {
            return Err(StatsError::Hidden);
        }

        let mut data = match self.data {
            Some(data) if !data.is_empty() => data,
            _ => return Err(StatsError::NoData),
        };

        let ships = data
            .remove(&account_id)
            .flatten()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                entry.pvp_solo.map(|solo| ShipStats {
                    ship_id: entry.ship_id,
                    damage_dealt: solo.damage_dealt,
                    wins: solo.wins,
                    frags: solo.frags,
                    battles: solo.battles,
                })
            })
            .collect();

        Ok(ships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ShipsStatsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_solo_stats() {
        let response = parse(
            r#"{
                "status": "ok",
                "meta": {"count": 1, "hidden": null},
                "data": {"500": [
                    {"ship_id": 1, "pvp_solo": {"damage_dealt": 120000, "wins": 60, "frags": 120, "battles": 100}},
                    {"ship_id": 2, "pvp_solo": null}
                ]}
            }"#,
        );

        let ships = response.into_ships(500).unwrap();
        assert_eq!(ships, vec![ShipStats::new(1, 100, 120_000, 120, 60)]);
    }

    #[test]
    fn error_status_is_api_error() {
        let response = parse(
            r#"{
                "status": "error",
                "error": {"field": "application_id", "message": "INVALID_APPLICATION_ID", "code": 407, "value": "x"}
            }"#,
        );

        assert_eq!(
            response.into_ships(1),
            Err(StatsError::Api {
                code: 407,
                message: "INVALID_APPLICATION_ID".into()
            })
        );
    }

    #[test]
    fn hidden_profile() {
        let response = parse(
            r#"{"status": "ok", "meta": {"count": 1, "hidden": [500]}, "data": {"500": null}}"#,
        );

        assert_eq!(response.into_ships(500), Err(StatsError::Hidden));
    }

    #[test]
    fn empty_data_is_no_data() {
        let response = parse(r#"{"status": "ok", "meta": {"count": 0}, "data": {}}"#);
        assert_eq!(response.into_ships(500), Err(StatsError::NoData));

        let response = parse(r#"{"status": "ok", "meta": {"count": 0}}"#);
        assert_eq!(response.into_ships(500), Err(StatsError::NoData));
    }

    #[test]
    fn null_ship_list_is_empty() {
        let response = parse(r#"{"status": "ok", "meta": {"count": 1}, "data": {"500": null}}"#);
        assert_eq!(response.into_ships(500), Ok(vec![]));
    }
}
