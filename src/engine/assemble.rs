//! Per-slot match summary assembly.
//!
//! A pure merge of the pipeline's outputs: joined per-block records,
//! winner, final totals, and benchmark comparison. No further computation
//! happens here beyond casting to the report's integer fields. All ten
//! slots are always present in the output, however sparse the joins were.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::models::{
    round1, BenchmarkTable, BenchmarkTotals, BlockStats, HeroTable, IntervalRecord, MatchSummary,
    Team, MAX_PLAYERS,
};

use super::finals::SlotFinals;
use super::EngineError;

/// Merge all pipeline outputs into one summary per slot.
pub fn assemble(
    records: Vec<IntervalRecord>,
    winning_team: Team,
    finals: &BTreeMap<u8, SlotFinals>,
    heroes: &HeroTable,
    benchmarks: &BenchmarkTable,
    match_length_seconds: f64,
    config: &EngineConfig,
) -> Result<BTreeMap<u8, MatchSummary>, EngineError> {
    let mut by_slot: BTreeMap<u8, Vec<IntervalRecord>> = BTreeMap::new();
    for record in records {
        by_slot.entry(record.slot).or_default().push(record);
    }

    let mut summaries = BTreeMap::new();
    for slot in 0..MAX_PLAYERS {
        let slot_finals = finals.get(&slot).ok_or_else(|| {
            EngineError::CorruptedData(format!("no final stats computed for slot {slot}"))
        })?;
        let hero = heroes
            .get(slot_finals.hero_id)
            .ok_or(EngineError::UnknownHero(slot_finals.hero_id))?;
        let benchmark = benchmarks
            .get(slot_finals.hero_id, config.benchmark_percentile)
            .ok_or(EngineError::MissingBenchmark {
                hero_id: slot_finals.hero_id,
                percentile: config.benchmark_percentile,
            })?;

        let mut rows = by_slot.remove(&slot).unwrap_or_default();
        rows.sort_by_key(|r| r.minute);

        let team = Team::from_slot(slot);
        summaries.insert(
            slot,
            MatchSummary {
                team,
                win: team == winning_team,
                hero: hero.display_name().to_string(),
                interval: config.block_minutes,
                stats: rows.iter().map(block_stats).collect(),
                final_stats: slot_finals.totals.clone(),
                benchmarks: BenchmarkTotals::for_match(benchmark, match_length_seconds),
            },
        );
    }

    Ok(summaries)
}

/// Flatten one joined record into report form. Rates for columns that were
/// not configured report as zero rather than being dropped.
fn block_stats(record: &IntervalRecord) -> BlockStats {
    BlockStats {
        minute: record.minute,
        gold_per_minute: record.rates.get("gold").copied().unwrap_or(0.0) as i64,
        last_hits: record.last_hits as i64,
        denies: record.denies as i64,
        xp_per_minute: record.rates.get("xp").copied().unwrap_or(0.0) as i64,
        kills: record.kills as i64,
        deaths: record.deaths as i64,
        assists: record.assists as i64,
        kda: round1(record.kda),
        damage_per_minute: record.hero_damage as i64,
        teamfight_seconds: record.teamfight_participation as i64,
    }
}
