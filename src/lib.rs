//! prserver - personal rating server for World of Warships players.
//!
//! Clients send a length-prefixed JSON batch of `(id, realm, account_id)`
//! requests over TCP; the server fetches each player's random-battle ship
//! statistics from the Wargaming API under a shared rate limit, scores them
//! against an expected-values baseline, and answers with one rating per
//! request.
//!
//! # Architecture
//!
//! - [`domain`] - Requests, ship statistics, baseline and the scoring
//!   transform. No I/O.
//! - [`port`] - The [`StatsSource`](port::outbound::stats::StatsSource)
//!   trait the application fetches through.
//! - [`application`] - Per-player fetch-and-score and batch fan-out.
//! - [`adapter`] - The framed TCP front end, the CLI, and the Wargaming
//!   HTTP client.
//! - [`infrastructure`] - Configuration, logging, rate limiting and
//!   startup wiring.
//! - [`error`] - Error types for the crate.
//!
//! # Sentinel ratings
//!
//! A player who cannot be scored still gets exactly one rating:
//!
//! | Value | Meaning            |
//! |-------|--------------------|
//! | `-1`  | transport failure  |
//! | `-2`  | no data            |
//! | `-3`  | hidden profile     |
//! | `-4`  | API error          |
//!
//! # Example
//!
//! ```
//! use prserver::domain::{score, Baseline, BaselineEntry, ShipStats};
//!
//! let baseline = Baseline::from_entries([(1, BaselineEntry::new(1000.0, 1.0, 50.0))]);
//! let ships = [ShipStats::new(1, 10, 10_000, 10, 5)];
//!
//! assert_eq!(score(&ships, &baseline), Some(1150.0));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
