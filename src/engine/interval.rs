//! Per-(block, slot) interval aggregation.
//!
//! Folds the interval snapshot sub-stream into one [`IntervalRecord`] per
//! (block, slot) pair actually observed. Only commutative aggregations
//! (sum, max, min) are used within a group, so grouping order cannot
//! change the result; "last observed" follows original stream order.
//!
//! Cumulative counters are non-decreasing within a match, so windowed
//! gains are computed as `max - min` within the block rather than
//! last-minus-first, which tolerates out-of-order events inside a block.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::models::{HeroTable, IntervalRecord, IntervalSnapshot};

use super::{block_index, minute_of, EngineError};

/// Aggregate validated interval snapshots into per-(block, slot) records.
///
/// Snapshots at `time <= 0` are pre-match noise and dropped. Absent
/// numeric values aggregate as zero. Hero names are attached from the
/// hero table; an unknown hero id is a data-integrity error.
pub fn aggregate(
    snapshots: &[IntervalSnapshot],
    heroes: &HeroTable,
    config: &EngineConfig,
) -> Result<Vec<IntervalRecord>, EngineError> {
    let mut groups: BTreeMap<(i64, u8), Vec<&IntervalSnapshot>> = BTreeMap::new();
    for snapshot in snapshots.iter().filter(|s| s.time > 0.0) {
        let block = block_index(snapshot.time, config.block_minutes);
        groups.entry((block, snapshot.slot)).or_default().push(snapshot);
    }

    let mut records = Vec::with_capacity(groups.len());
    for ((block, slot), group) in groups {
        // Groups are non-empty by construction.
        let Some(last) = group.last() else { continue };
        let Some(first) = group.first() else { continue };

        let hero_id = group.iter().rev().find_map(|s| s.hero_id);
        let (hero_name, localized_hero_name) = match hero_id {
            Some(id) => {
                let info = heroes.get(id).ok_or(EngineError::UnknownHero(id))?;
                (Some(info.name.clone()), Some(info.localized_name.clone()))
            }
            None => (None, None),
        };

        let kills = max_counter(&group, "kills");
        let deaths = max_counter(&group, "deaths");
        let assists = max_counter(&group, "assists");

        let mut rates = BTreeMap::new();
        for column in &config.rate_columns {
            rates.insert(column.clone(), windowed_gain(&group, column));
        }

        records.push(IntervalRecord {
            block,
            slot,
            minute: minute_of(last.time),
            time: last.time,
            block_start: first.time,
            level: group.iter().rev().find_map(|s| s.level).unwrap_or(0),
            hero_id,
            hero_name,
            localized_hero_name,
            teamfight_participation: group
                .iter()
                .filter_map(|s| s.teamfight_participation)
                .sum(),
            kills,
            deaths,
            assists,
            denies: windowed_gain(&group, "denies"),
            last_hits: windowed_gain(&group, "lh"),
            kda: (kills + assists) / deaths.max(1.0),
            rates,
            hero_damage: 0.0,
        });
    }

    Ok(records)
}

/// Max of a counter over the group, zero when never present.
fn max_counter(group: &[&IntervalSnapshot], column: &str) -> f64 {
    group
        .iter()
        .filter_map(|s| s.counter(column))
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0)
}

/// Windowed gain of a cumulative counter: `max - min` over the group,
/// zero when never present.
fn windowed_gain(group: &[&IntervalSnapshot], column: &str) -> f64 {
    let mut values = group.iter().filter_map(|s| s.counter(column));
    let Some(first) = values.next() else {
        return 0.0;
    };
    let (min, max) = values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
    max - min
}
