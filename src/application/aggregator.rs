//! Batch fan-out and collection.
//!
//! ```text
//! RequestBatch ──┬── task ── StatsFetcher::rate ──┐
//!                ├── task ── StatsFetcher::rate ──┼──▶ Vec<Rating> (completion order)
//!                └── task ── StatsFetcher::rate ──┘
//! ```
//!
//! Each request runs on its own tokio task, so a caller that goes away does
//! not cancel fetches already in flight; the deadline bounds them instead.

use std::sync::Arc;

use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{debug, error};

use super::fetcher::StatsFetcher;
use crate::domain::{Rating, RatingFailure, RequestBatch};

/// Rates whole batches by running one fetcher task per request.
pub struct BatchAggregator {
    fetcher: Arc<StatsFetcher>,
    /// Process-wide bound on concurrent fetches, shared by every batch.
    in_flight: Option<Arc<Semaphore>>,
}

impl BatchAggregator {
    #[must_use]
    pub const fn new(fetcher: Arc<StatsFetcher>) -> Self {
        Self {
            fetcher,
            in_flight: None,
        }
    }

    /// Bound concurrent fetches across all batches served by this
    /// aggregator; `None` leaves fan-out unbounded.
    #[must_use]
    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.in_flight = limit.map(|limit| Arc::new(Semaphore::new(limit.max(1))));
        self
    }

    /// Rate every request in `batch`, returning one rating per request in
    /// completion order.
    pub async fn rate_batch(&self, batch: RequestBatch, deadline: Instant) -> Vec<Rating> {
        let expected = batch.len();

        let mut pending: FuturesUnordered<_> = batch
            .into_iter()
            .map(|request| {
                let id = request.id;
                let fetcher = Arc::clone(&self.fetcher);
                let gate = self.in_flight.clone();

                tokio::spawn(async move {
                    let _permit = match gate {
                        Some(gate) => gate.acquire_owned().await.ok(),
                        None => None,
                    };
                    fetcher.rate(&request, deadline).await
                })
                .map(move |joined| {
                    joined.unwrap_or_else(|err| {
                        error!(id, error = %err, "Fetch task failed");
                        Rating::failed(id, RatingFailure::TransportFailure)
                    })
                })
            })
            .collect();

        let mut ratings = Vec::with_capacity(expected);
        while let Some(rating) = pending.next().await {
            ratings.push(rating);
        }

        debug!(
            requested = expected,
            rated = ratings.iter().filter(|r| r.is_scored()).count(),
            "Batch complete"
        );
        ratings
    }
}
