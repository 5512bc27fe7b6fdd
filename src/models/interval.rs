//! Aggregated per-player interval statistics per time block.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::damage::MIN_SPAN_SECS;

/// Windowed statistics for one (block, slot) pair.
///
/// Produced by the interval aggregator with absolute windowed gains in
/// `rates` and zero `hero_damage`; the join step fills in damage and
/// converts both to per-minute rates over the block's wall-clock span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// Block index
    pub block: i64,

    /// Player slot
    pub slot: u8,

    /// Last observed minute in the block
    pub minute: i64,

    /// Last observed timestamp in the block (block end)
    pub time: f64,

    /// First observed timestamp in the block
    pub block_start: f64,

    /// Last observed hero level
    pub level: u32,

    /// Last observed hero id
    pub hero_id: Option<u32>,

    /// Internal hero unit name, attached from the hero table
    pub hero_name: Option<String>,

    /// Localized hero name, attached from the hero table
    pub localized_hero_name: Option<String>,

    /// Summed teamfight seconds within the block
    pub teamfight_participation: f64,

    /// Max cumulative kills observed in the block
    pub kills: f64,

    /// Max cumulative deaths observed in the block
    pub deaths: f64,

    /// Max cumulative assists observed in the block
    pub assists: f64,

    /// Denies gained within the block (windowed max - min)
    pub denies: f64,

    /// Last hits gained within the block (windowed max - min)
    pub last_hits: f64,

    /// (kills + assists) / max(deaths, 1), from the block's maxima
    pub kda: f64,

    /// Windowed gain per configured rate column, keyed by column name
    pub rates: BTreeMap<String, f64>,

    /// Hero damage joined from the damage aggregator (zero when the hero
    /// dealt no recorded hero damage in the block)
    pub hero_damage: f64,
}

impl IntervalRecord {
    /// Wall-clock span the block actually covers, floored at one second.
    /// Identical snapshots at the block edges must not divide by zero.
    pub fn block_span(&self) -> f64 {
        (self.time - self.block_start).max(MIN_SPAN_SECS)
    }
}
