//! Statistics source port.
//!
//! Defines the interface for fetching one account's per-ship statistics
//! from an upstream cluster, and the failure classes it can report.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{RatingFailure, ShipStats};

/// Why a statistics lookup produced no ships.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The realm has no configured endpoint.
    #[error("unknown realm '{0}'")]
    UnknownRealm(String),

    /// The request could not be sent or the response could not be decoded.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Upstream answered with `status: "error"`.
    #[error("upstream error {code}: {message}")]
    Api { code: i64, message: String },

    /// The account's statistics are private.
    #[error("profile is hidden")]
    Hidden,

    /// Upstream returned no data entries for the account.
    #[error("no data returned")]
    NoData,
}

impl StatsError {
    /// The sentinel class reported to the client for this error.
    #[must_use]
    pub const fn failure(&self) -> RatingFailure {
        match self {
            Self::UnknownRealm(_) | Self::Transport(_) => RatingFailure::TransportFailure,
            Self::Api { .. } => RatingFailure::ApiError,
            Self::Hidden => RatingFailure::HiddenProfile,
            Self::NoData => RatingFailure::NoData,
        }
    }
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Port for fetching per-ship statistics.
///
/// Implementations perform exactly one upstream call per invocation and do
/// not retry. Pacing is the caller's responsibility.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch random-battle statistics for every ship the account has played.
    async fn fetch(&self, realm: &str, account_id: u64) -> Result<Vec<ShipStats>, StatsError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
