//! Personal rating computation.
//!
//! A player's ships are compared against the baseline in aggregate: actual
//! damage, frags, and wins are summed over every qualifying ship and divided
//! by what an average player would have achieved in the same number of
//! battles on the same ships. Each ratio is then rescaled so that its floor
//! maps to zero and parity with the baseline maps to one:
//!
//! ```text
//! n = max(0, (ratio - floor) / (1 - floor))
//! rating = 700 * n_damage + 300 * n_frags + 150 * n_wins
//! ```
//!
//! A ship qualifies when it has at least one battle and a baseline row.
//! When none qualify there is nothing to compare against and [`score`]
//! returns `None`. An individual expected sum of zero (a baseline row with a
//! zero average) makes that ratio `0.0`, so the result is always finite.
//!
//! # Example
//!
//! ```
//! use prserver::domain::{score, Baseline, BaselineEntry, ShipStats};
//!
//! let baseline = Baseline::from_entries([(1, BaselineEntry::new(1000.0, 1.0, 50.0))]);
//! let ships = [ShipStats::new(1, 10, 10_000, 10, 5)];
//!
//! // Exactly average on every axis.
//! let rating = score(&ships, &baseline).unwrap();
//! assert!((rating - 1150.0).abs() < 1e-9);
//! ```

use super::baseline::Baseline;
use super::stats::ShipStats;

const DAMAGE_FLOOR: f64 = 0.4;
const FRAGS_FLOOR: f64 = 0.1;
const WINS_FLOOR: f64 = 0.7;

const DAMAGE_WEIGHT: f64 = 700.0;
const FRAGS_WEIGHT: f64 = 300.0;
const WINS_WEIGHT: f64 = 150.0;

/// Normalized per-axis terms before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub damage: f64,
    pub frags: f64,
    pub wins: f64,
    /// Number of ships that contributed.
    pub ships: usize,
}

impl ScoreBreakdown {
    /// Aggregate `ships` against `baseline`, or `None` if no ship qualifies.
    #[must_use]
    pub fn compute(ships: &[ShipStats], baseline: &Baseline) -> Option<Self> {
        let totals = ships
            .iter()
            .filter(|ship| ship.battles > 0)
            .filter_map(|ship| baseline.get(ship.ship_id).map(|entry| (ship, entry)))
            .fold(Totals::default(), |mut totals, (ship, entry)| {
                let battles = f64::from(ship.battles);

                totals.damage = totals.damage.saturating_add(ship.damage_dealt);
                totals.frags += u64::from(ship.frags);
                totals.wins += u64::from(ship.wins);

                totals.expected_damage += entry.average_damage_dealt * battles;
                totals.expected_frags += entry.average_frags * battles;
                totals.expected_wins += battles * entry.win_rate / 100.0;
                totals.ships += 1;
                totals
            });

        if totals.ships == 0 {
            return None;
        }

        Some(Self {
            damage: normalize(
                ratio(totals.damage as f64, totals.expected_damage),
                DAMAGE_FLOOR,
            ),
            frags: normalize(ratio(totals.frags as f64, totals.expected_frags), FRAGS_FLOOR),
            wins: normalize(ratio(totals.wins as f64, totals.expected_wins), WINS_FLOOR),
            ships: totals.ships,
        })
    }

    /// Weighted composite rating.
    #[must_use]
    pub fn rating(&self) -> f64 {
        DAMAGE_WEIGHT * self.damage + FRAGS_WEIGHT * self.frags + WINS_WEIGHT * self.wins
    }
}

/// Compute the composite rating for one player's ships.
#[must_use]
pub fn score(ships: &[ShipStats], baseline: &Baseline) -> Option<f64> {
    ScoreBreakdown::compute(ships, baseline).map(|breakdown| breakdown.rating())
}

#[derive(Default)]
struct Totals {
    damage: u64,
    frags: u64,
    wins: u64,
    expected_damage: f64,
    expected_frags: f64,
    expected_wins: f64,
    ships: usize,
}

fn ratio(actual: f64, expected: f64) -> f64 {
    if expected > 0.0 {
        actual / expected
    } else {
        0.0
    }
}

fn normalize(ratio: f64, floor: f64) -> f64 {
    ((ratio - floor) / (1.0 - floor)).max(0.0)
}
