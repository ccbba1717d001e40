//! Process-wide pacing for upstream calls.
//!
//! [`RateLimiter`] spaces callers evenly at `1s / rate` apart. It keeps no
//! burst credit: a caller arriving after a quiet period proceeds at once,
//! but the next slot is still one full interval after it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use prserver::infrastructure::limiter::RateLimiter;
//!
//! # tokio_test::block_on(async {
//! let limiter = Arc::new(RateLimiter::per_second(50));
//! limiter.acquire().await;
//! limiter.acquire().await; // released ~20ms after the first
//! # });
//! ```

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{sleep_until, Instant};

/// Even-spacing rate limiter shared by every fetch in the process.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    /// Earliest instant the next caller may be released.
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Limit to `rate` releases per second. A rate of zero is treated as one.
    #[must_use]
    pub fn per_second(rate: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / rate.max(1))
    }

    /// Release callers at most once per `interval`.
    #[must_use]
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A limiter that never waits.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::with_interval(Duration::ZERO)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until this caller is allowed to proceed.
    ///
    /// The slot is reserved under the lock and the wait happens outside it,
    /// so concurrent callers queue in reservation order.
    pub async fn acquire(&self) {
        let slot = self.reserve(Instant::now());
        sleep_until(slot).await;
    }

    /// Like [`Self::acquire`], but gives up at once when the next free slot
    /// lies past `deadline`.
    ///
    /// Returns `false` without reserving anything in that case, so callers
    /// that would time out anyway leave the schedule untouched and later
    /// callers are not pushed back by them.
    pub async fn acquire_before(&self, deadline: Instant) -> bool {
        match self.reserve_before(Instant::now(), deadline) {
            Some(slot) => {
                sleep_until(slot).await;
                true
            }
            None => false,
        }
    }

    fn reserve(&self, now: Instant) -> Instant {
        let mut next_slot = self.next_slot.lock();
        let slot = Self::earliest(*next_slot, now);
        *next_slot = Some(slot + self.interval);
        slot
    }

    fn reserve_before(&self, now: Instant, deadline: Instant) -> Option<Instant> {
        let mut next_slot = self.next_slot.lock();
        let slot = Self::earliest(*next_slot, now);
        if slot > deadline {
            return None;
        }
        *next_slot = Some(slot + self.interval);
        Some(slot)
    }

    fn earliest(next_slot: Option<Instant>, now: Instant) -> Instant {
        match next_slot {
            Some(next) if next > now => next,
            _ => now,
        }
    }
}
