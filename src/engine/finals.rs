//! End-of-match totals per player slot.
//!
//! Reads each slot's terminal interval snapshot directly; no per-block
//! math is involved. Total damage is the hero's raw summed damage across
//! the whole match, not a rate.

use std::collections::BTreeMap;

use crate::models::{round1, DamageRecord, FinalStats, HeroTable, IntervalSnapshot, MAX_PLAYERS};

use super::EngineError;

/// Final totals for one slot, with the hero id the assembler needs for
/// name and benchmark lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFinals {
    pub hero_id: u32,
    pub totals: FinalStats,
}

/// Compute end-of-match totals for all ten slots.
///
/// A slot with no terminal snapshot, or one without a hero id, makes the
/// match unusable: the summary would have no identity to hang stats on.
pub fn compute(
    snapshots: &[IntervalSnapshot],
    damage: &[DamageRecord],
    heroes: &HeroTable,
) -> Result<BTreeMap<u8, SlotFinals>, EngineError> {
    let mut terminal: BTreeMap<u8, &IntervalSnapshot> = BTreeMap::new();
    for snapshot in snapshots {
        terminal
            .entry(snapshot.slot)
            .and_modify(|current| {
                // Later stream position wins ties, like the original data.
                if snapshot.time >= current.time {
                    *current = snapshot;
                }
            })
            .or_insert(snapshot);
    }

    let mut finals = BTreeMap::new();
    for slot in 0..MAX_PLAYERS {
        let snapshot = terminal.get(&slot).ok_or_else(|| {
            EngineError::CorruptedData(format!("slot {slot} has no terminal interval snapshot"))
        })?;
        let hero_id = snapshot.hero_id.ok_or_else(|| {
            EngineError::CorruptedData(format!("slot {slot} terminal snapshot has no hero id"))
        })?;
        let hero = heroes.get(hero_id).ok_or(EngineError::UnknownHero(hero_id))?;

        let total_damage: f64 = damage
            .iter()
            .filter(|d| d.attacker == hero.name)
            .map(|d| d.value)
            .sum();

        let kills = snapshot.kills.unwrap_or(0.0);
        let deaths = snapshot.deaths.unwrap_or(0.0);
        let assists = snapshot.assists.unwrap_or(0.0);

        finals.insert(
            slot,
            SlotFinals {
                hero_id,
                totals: FinalStats {
                    gold: snapshot.gold.unwrap_or(0.0) as i64,
                    last_hits: snapshot.last_hits.unwrap_or(0.0) as i64,
                    denies: snapshot.denies.unwrap_or(0.0) as i64,
                    xp: snapshot.xp.unwrap_or(0.0) as i64,
                    kills: kills as i64,
                    deaths: deaths as i64,
                    assists: assists as i64,
                    kda: round1((kills + assists) / deaths.max(1.0)),
                    damage: total_damage as i64,
                },
            },
        );
    }

    Ok(finals)
}
