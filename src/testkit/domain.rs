//! Builders for domain primitives used across tests.

use crate::domain::{Baseline, BaselineEntry, PlayerRequest, RequestBatch, ShipStats};

/// Ship id of the reference baseline row.
pub const REFERENCE_SHIP: u64 = 100;

/// Rating of [`reference_ships`] against [`reference_baseline`]:
/// `700 * 4/3 + 300 * 11/9 + 150 * 43/33`.
pub const REFERENCE_RATING: f64 = 16450.0 / 11.0;

/// One ship: 1000 average damage, 1 average frag, 55% win rate.
pub fn reference_baseline() -> Baseline {
    Baseline::from_entries([(REFERENCE_SHIP, BaselineEntry::new(1000.0, 1.0, 55.0))])
}

/// 100 battles, 120k damage, 120 frags, 60 wins on the reference ship.
pub fn reference_ships() -> Vec<ShipStats> {
    vec![ShipStats::new(REFERENCE_SHIP, 100, 120_000, 120, 60)]
}

/// `n` requests with ids `1..=n` and account ids `1000 + id` on `realm`.
pub fn batch(n: u64, realm: &str) -> RequestBatch {
    (1..=n)
        .map(|id| PlayerRequest::new(id, realm, 1000 + id))
        .collect()
}

/// Whether two floats agree to within `1e-9`.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
