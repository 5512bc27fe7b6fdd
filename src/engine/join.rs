//! Join of interval and damage aggregates, plus rate normalization.
//!
//! This is a left join: every interval record appears exactly once in the
//! output, with damage zero-filled when the hero dealt no recorded hero
//! damage in that block. After the join, the configured rate columns and
//! the damage column are converted from absolute per-block totals into
//! per-minute rates over the block's wall-clock span.

use std::collections::HashMap;

use crate::models::{DamageRecord, IntervalRecord};

/// Left-join damage onto interval records by (block, hero name) and
/// normalize windowed totals into per-minute rates.
///
/// The block span is the recorded `last - first` snapshot time, floored at
/// one second: identical snapshots at the block edges must not divide by
/// zero.
pub fn join_and_normalize(
    records: Vec<IntervalRecord>,
    damage: &[DamageRecord],
    rate_columns: &[String],
) -> Vec<IntervalRecord> {
    let damage_by_key: HashMap<(i64, &str), &DamageRecord> = damage
        .iter()
        .map(|d| ((d.block, d.attacker.as_str()), d))
        .collect();

    records
        .into_iter()
        .map(|mut record| {
            let damage_total = record
                .hero_name
                .as_deref()
                .and_then(|name| damage_by_key.get(&(record.block, name)))
                .map_or(0.0, |d| d.value);

            let span = record.block_span();
            for column in rate_columns {
                if let Some(value) = record.rates.get_mut(column) {
                    *value = *value / span * 60.0;
                }
            }
            record.hero_damage = damage_total / span * 60.0;
            record
        })
        .collect()
}
