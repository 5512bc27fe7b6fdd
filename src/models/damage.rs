//! Aggregated hero-vs-hero damage per time block.

use serde::{Deserialize, Serialize};

/// Minimum wall-clock span, in seconds, used when converting a block total
/// into a per-minute rate. A block observed at a single instant would
/// otherwise divide by zero.
pub const MIN_SPAN_SECS: f64 = 1.0;

/// Summed hero damage dealt by one hero in one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRecord {
    /// Block index
    pub block: i64,

    /// Attacking hero's internal unit name
    pub attacker: String,

    /// Total damage dealt to heroes within the block
    pub value: f64,

    /// Earliest observed damage timestamp in the block
    pub time_min: f64,

    /// Latest observed damage timestamp in the block
    pub time_max: f64,
}

impl DamageRecord {
    /// Damage per minute over the block's actual observed span, floored at
    /// one second.
    pub fn dpm(&self) -> f64 {
        self.value / (self.time_max - self.time_min).max(MIN_SPAN_SECS) * 60.0
    }
}
