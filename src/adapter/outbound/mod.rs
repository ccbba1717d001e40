//! Outbound adapters (driven side).

pub mod wargaming;
