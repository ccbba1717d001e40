//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Scripted [`StatsSource`](crate::port::outbound::stats::StatsSource)
//!   with per-account responses, delays, and call counting.
//! - [`domain`] - Builders for baselines, ships, and request batches.
//! - [`config`] - Canonical fast configurations for tests.

pub mod config;
pub mod domain;
pub mod source;
