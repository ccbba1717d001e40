//! Single-player rating: pace, fetch, score.

use std::sync::Arc;

use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::domain::{Baseline, PlayerRequest, Rating, RatingFailure, ScoreBreakdown};
use crate::infrastructure::limiter::RateLimiter;
use crate::port::outbound::stats::{StatsError, StatsSource};

/// Rates one player at a time against a shared source, limiter and baseline.
///
/// Every call produces exactly one [`Rating`]; failures come back as
/// sentinel ratings rather than errors.
pub struct StatsFetcher {
    source: Arc<dyn StatsSource>,
    limiter: Arc<RateLimiter>,
    baseline: Arc<Baseline>,
}

impl StatsFetcher {
    #[must_use]
    pub fn new(
        source: Arc<dyn StatsSource>,
        limiter: Arc<RateLimiter>,
        baseline: Arc<Baseline>,
    ) -> Self {
        Self {
            source,
            limiter,
            baseline,
        }
    }

    /// Rate `request`, giving up at `deadline`.
    ///
    /// The limiter wait counts against the deadline. A request whose rate
    /// limit slot would start after it is refused without taking the slot,
    /// and a fetch still pending when it passes is reported as a transport
    /// failure.
    pub async fn rate(&self, request: &PlayerRequest, deadline: Instant) -> Rating {
        match timeout_at(deadline, self.fetch_and_score(request, deadline)).await {
            Ok(rating) => rating,
            Err(_) => {
                warn!(
                    id = request.id,
                    realm = %request.realm,
                    account_id = request.account_id,
                    "Deadline elapsed before statistics arrived"
                );
                Rating::failed(request.id, RatingFailure::TransportFailure)
            }
        }
    }

    async fn fetch_and_score(&self, request: &PlayerRequest, deadline: Instant) -> Rating {
        if !self.limiter.acquire_before(deadline).await {
            warn!(
                id = request.id,
                realm = %request.realm,
                account_id = request.account_id,
                "No rate-limit slot before the deadline"
            );
            return Rating::failed(request.id, RatingFailure::TransportFailure);
        }

        let ships = match self.source.fetch(&request.realm, request.account_id).await {
            Ok(ships) => ships,
            Err(err) => {
                log_failure(request, &err, self.source.source_name());
                return Rating::failed(request.id, err.failure());
            }
        };

        match ScoreBreakdown::compute(&ships, &self.baseline) {
            Some(breakdown) => {
                let rating = breakdown.rating();
                debug!(
                    id = request.id,
                    account_id = request.account_id,
                    ships = breakdown.ships,
                    rating,
                    "Rated player"
                );
                Rating::scored(request.id, rating)
            }
            None => {
                debug!(
                    id = request.id,
                    account_id = request.account_id,
                    returned = ships.len(),
                    "No ship matched the baseline"
                );
                Rating::failed(request.id, RatingFailure::NoData)
            }
        }
    }
}

fn log_failure(request: &PlayerRequest, err: &StatsError, source: &str) {
    match err {
        StatsError::Transport(_) | StatsError::UnknownRealm(_) | StatsError::Api { .. } => warn!(
            source,
            id = request.id,
            realm = %request.realm,
            account_id = request.account_id,
            error = %err,
            "Statistics fetch failed"
        ),
        StatsError::Hidden | StatsError::NoData => debug!(
            source,
            id = request.id,
            account_id = request.account_id,
            reason = %err,
            "Player cannot be rated"
        ),
    }
}
