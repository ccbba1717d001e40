//! Raw per-ship counters as reported by the statistics source.

use serde::{Deserialize, Serialize};

/// Random-battle (solo) counters for one ship of one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStats {
    pub ship_id: u64,
    pub damage_dealt: u64,
    pub wins: u32,
    pub frags: u32,
    pub battles: u32,
}

impl ShipStats {
    #[must_use]
    pub const fn new(ship_id: u64, battles: u32, damage_dealt: u64, frags: u32, wins: u32) -> Self {
        Self {
            ship_id,
            damage_dealt,
            wins,
            frags,
            battles,
        }
    }
}
