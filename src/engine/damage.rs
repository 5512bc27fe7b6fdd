//! Per-(block, attacker) hero damage aggregation.
//!
//! Operates independently of the per-slot interval aggregation and is
//! joined back onto it by (block, hero name) later. Only hero-to-hero
//! damage counts: attacker and target must both carry the hero unit name
//! prefix and the explicit hero flag.

use std::collections::BTreeMap;

use crate::models::{DamageEvent, DamageRecord};

use super::block_index;

/// Sum hero-to-hero damage per (block, attacker name), recording the
/// observed time span of each block. Pre-match events are dropped, same
/// as for interval snapshots.
pub fn aggregate(events: &[DamageEvent], block_minutes: u32) -> Vec<DamageRecord> {
    let mut groups: BTreeMap<(i64, &str), DamageRecord> = BTreeMap::new();

    for event in events
        .iter()
        .filter(|e| e.time > 0.0 && e.is_hero_to_hero())
    {
        let block = block_index(event.time, block_minutes);
        let record = groups
            .entry((block, event.attacker.as_str()))
            .or_insert_with(|| DamageRecord {
                block,
                attacker: event.attacker.clone(),
                value: 0.0,
                time_min: event.time,
                time_max: event.time,
            });
        record.value += event.value;
        record.time_min = record.time_min.min(event.time);
        record.time_max = record.time_max.max(event.time);
    }

    groups.into_values().collect()
}
