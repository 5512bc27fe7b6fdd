//! Replay telemetry aggregation engine.
//!
//! Turns one match's raw event stream into per-player summaries:
//! classification into typed sub-streams, fixed-width time bucketing,
//! windowed counter deltas and per-minute rates, hero damage aggregation
//! joined back onto the per-player windows, winner extraction, end-of-match
//! totals, and benchmark comparison.
//!
//! Processing is single-threaded and allocation-only per match; the hero
//! and benchmark tables are read-only, so callers may aggregate many
//! matches concurrently against the same engine.

pub mod assemble;
pub mod classify;
pub mod damage;
pub mod finals;
pub mod interval;
pub mod join;
pub mod winner;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::models::{BenchmarkTable, HeroTable, IntervalSnapshot, MatchSummary, RawEvent};

/// Errors produced while aggregating one match.
///
/// All variants are fatal for the affected match only; the engine never
/// retries and never logs-and-swallows. Callers decide whether to skip the
/// match or abort the batch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The event stream is missing a required sub-stream, a required
    /// interval field, or a slot's terminal snapshot.
    #[error("Corrupted match data: {0}")]
    CorruptedData(String),

    /// An interval event referenced a hero id absent from the hero table.
    #[error("Hero id {0} is not in the hero table")]
    UnknownHero(u32),

    /// The benchmark table has no entry for this hero/percentile pair.
    /// A configuration problem, not a per-match data problem.
    #[error("No benchmark for hero id {hero_id} at percentile {percentile}")]
    MissingBenchmark { hero_id: u32, percentile: u8 },
}

/// Block index for a timestamp. Blocks are contiguous, non-overlapping
/// windows of `block_minutes`; block 0 starts at second 1.
pub fn block_index(time: f64, block_minutes: u32) -> i64 {
    ((time - 1.0) / 60.0 / f64::from(block_minutes)).floor() as i64
}

/// Match minute of a timestamp.
pub fn minute_of(time: f64) -> i64 {
    (time / 60.0).floor() as i64
}

/// Match length in seconds: the span covered by the interval sub-stream,
/// pre-match snapshots included.
pub fn match_length_seconds(snapshots: &[IntervalSnapshot]) -> f64 {
    let mut times = snapshots.iter().map(|s| s.time);
    let Some(first) = times.next() else {
        return 0.0;
    };
    let (min, max) = times.fold((first, first), |(min, max), t| (min.min(t), max.max(t)));
    max - min
}

/// The aggregation engine: validated configuration plus the shared
/// read-only lookup tables.
#[derive(Debug, Clone)]
pub struct SummaryEngine {
    heroes: HeroTable,
    benchmarks: BenchmarkTable,
    config: EngineConfig,
}

impl SummaryEngine {
    pub fn new(heroes: HeroTable, benchmarks: BenchmarkTable, config: EngineConfig) -> Self {
        Self {
            heroes,
            benchmarks,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aggregate one match's raw event stream into per-slot summaries.
    ///
    /// Always produces exactly [`crate::models::MAX_PLAYERS`] entries on
    /// success, however sparse the input is for any individual slot.
    pub fn process(&self, events: &[RawEvent]) -> Result<BTreeMap<u8, MatchSummary>, EngineError> {
        let streams = classify::classify(events, &self.config.rate_columns)?;

        let match_length = match_length_seconds(&streams.intervals);
        let winning_team = winner::extract(&streams.building_kills)?;

        let damage_records = damage::aggregate(&streams.damage, self.config.block_minutes);
        let slot_finals = finals::compute(&streams.intervals, &damage_records, &self.heroes)?;

        let interval_records =
            interval::aggregate(&streams.intervals, &self.heroes, &self.config)?;
        let joined = join::join_and_normalize(
            interval_records,
            &damage_records,
            &self.config.rate_columns,
        );

        assemble::assemble(
            joined,
            winning_team,
            &slot_finals,
            &self.heroes,
            &self.benchmarks,
            match_length,
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Team, MAX_PLAYERS};
    use serde_json::json;

    fn interval_event(time: f64, slot: u8, gold: f64, xp: f64) -> RawEvent {
        serde_json::from_value(json!({
            "type": "interval",
            "time": time,
            "slot": slot,
            "hero_id": slot + 1,
            "level": 5,
            "gold": gold,
            "xp": xp,
            "lh": gold / 50.0,
            "denies": 2,
            "kills": 1,
            "deaths": 0,
            "assists": 1,
            "teamfight_participation": 1.5,
        }))
        .unwrap()
    }

    fn damage_event(time: f64, attacker_id: u8, target_id: u8, value: f64) -> RawEvent {
        serde_json::from_value(json!({
            "type": "DOTA_COMBATLOG_DAMAGE",
            "time": time,
            "attackername": format!("npc_dota_hero_{}", attacker_id),
            "targetname": format!("npc_dota_hero_{}", target_id),
            "attackerhero": true,
            "targethero": true,
            "value": value,
        }))
        .unwrap()
    }

    fn building_kill(time: f64, target: &str) -> RawEvent {
        serde_json::from_value(json!({
            "type": "DOTA_COMBATLOG_TEAM_BUILDING_KILL",
            "time": time,
            "targetname": target,
        }))
        .unwrap()
    }

    fn hero_table() -> HeroTable {
        let entries: std::collections::HashMap<String, crate::models::HeroInfo> = (0
            ..MAX_PLAYERS)
            .map(|slot| {
                let id = slot + 1;
                (
                    id.to_string(),
                    crate::models::HeroInfo {
                        name: format!("npc_dota_hero_{id}"),
                        localized_name: format!("Hero {id}"),
                    },
                )
            })
            .collect();
        HeroTable::from_json(&serde_json::to_string(&entries).unwrap()).unwrap()
    }

    fn benchmark_table() -> BenchmarkTable {
        let mut table = serde_json::Map::new();
        for slot in 0..MAX_PLAYERS {
            let id = slot + 1;
            table.insert(
                id.to_string(),
                json!({
                    "gold_per_min": {"50": 400.0},
                    "xp_per_min": {"50": 500.0},
                    "kills_per_min": {"50": 0.2},
                    "last_hits_per_min": {"50": 5.0},
                    "hero_damage_per_min": {"50": 300.0},
                    "hero_healing_per_min": {"50": 0.0},
                    "tower_damage": {"50": 1000.0}
                }),
            );
        }
        BenchmarkTable::from_json(&serde_json::Value::Object(table).to_string()).unwrap()
    }

    /// Minimal but complete stream: snapshots for every slot across two
    /// blocks, some hero damage, and a final building kill.
    fn valid_stream(fort: &str) -> Vec<RawEvent> {
        let mut events = Vec::new();
        for slot in 0..MAX_PLAYERS {
            for minute in 1..=20 {
                let t = f64::from(minute) * 60.0;
                events.push(interval_event(t, slot, f64::from(minute) * 100.0, f64::from(minute) * 120.0));
            }
        }
        events.push(damage_event(200.0, 1, 6, 250.0));
        events.push(damage_event(260.0, 1, 6, 150.0));
        events.push(building_kill(1190.0, fort));
        events
    }

    fn engine() -> SummaryEngine {
        SummaryEngine::new(hero_table(), benchmark_table(), EngineConfig::default())
    }

    #[test]
    fn test_process_produces_all_ten_slots() {
        let summaries = engine().process(&valid_stream("npc_dota_badguys_fort")).unwrap();
        assert_eq!(summaries.len(), usize::from(MAX_PLAYERS));
        for slot in 0..MAX_PLAYERS {
            assert!(summaries.contains_key(&slot), "slot {slot} missing");
        }
    }

    #[test]
    fn test_process_sets_teams_and_win_flags() {
        let summaries = engine().process(&valid_stream("npc_dota_badguys_fort")).unwrap();
        for (slot, summary) in &summaries {
            let expected_team = Team::from_slot(*slot);
            assert_eq!(summary.team, expected_team);
            assert_eq!(summary.win, expected_team == Team::Radiant);
        }

        let summaries = engine().process(&valid_stream("npc_dota_goodguys_fort")).unwrap();
        assert!(!summaries[&0].win);
        assert!(summaries[&9].win);
    }

    #[test]
    fn test_process_missing_stream_is_corrupted_data() {
        let stream: Vec<RawEvent> = valid_stream("npc_dota_badguys_fort")
            .into_iter()
            .filter(|e| e.event_type != "DOTA_COMBATLOG_TEAM_BUILDING_KILL")
            .collect();

        let err = engine().process(&stream).unwrap_err();
        match err {
            EngineError::CorruptedData(msg) => {
                assert!(msg.contains("DOTA_COMBATLOG_TEAM_BUILDING_KILL"), "{msg}");
            }
            other => panic!("expected CorruptedData, got {other:?}"),
        }
    }

    #[test]
    fn test_process_missing_field_names_it() {
        let mut stream = valid_stream("npc_dota_badguys_fort");
        for event in &mut stream {
            event.denies = None;
        }

        let err = engine().process(&stream).unwrap_err();
        match err {
            EngineError::CorruptedData(msg) => assert!(msg.contains("denies"), "{msg}"),
            other => panic!("expected CorruptedData, got {other:?}"),
        }
    }

    #[test]
    fn test_process_missing_benchmark_is_distinguishable() {
        let config = EngineConfig {
            benchmark_percentile: 85,
            ..EngineConfig::default()
        };
        let engine = SummaryEngine::new(hero_table(), benchmark_table(), config);

        let err = engine.process(&valid_stream("npc_dota_badguys_fort")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingBenchmark { percentile: 85, .. }
        ));
    }

    #[test]
    fn test_process_stats_sorted_by_minute() {
        let summaries = engine().process(&valid_stream("npc_dota_badguys_fort")).unwrap();
        let stats = &summaries[&0].stats;
        assert!(!stats.is_empty());
        assert!(stats.windows(2).all(|w| w[0].minute <= w[1].minute));
    }

    #[test]
    fn test_block_index_boundaries() {
        // Block 0 starts at second 1.
        assert_eq!(block_index(1.0, 5), 0);
        assert_eq!(block_index(300.0, 5), 0);
        assert_eq!(block_index(301.0, 5), 1);
        assert_eq!(block_index(600.0, 5), 1);
        assert_eq!(block_index(601.0, 5), 2);

        assert_eq!(block_index(600.0, 10), 0);
        assert_eq!(block_index(601.0, 10), 1);
    }

    #[test]
    fn test_minute_of() {
        assert_eq!(minute_of(0.0), 0);
        assert_eq!(minute_of(59.9), 0);
        assert_eq!(minute_of(60.0), 1);
        assert_eq!(minute_of(119.0), 1);
    }

    #[test]
    fn test_match_length_spans_interval_stream() {
        let snapshots = vec![
            IntervalSnapshot::from_raw(&interval_event(-90.0, 0, 0.0, 0.0)).unwrap(),
            IntervalSnapshot::from_raw(&interval_event(60.0, 0, 100.0, 120.0)).unwrap(),
            IntervalSnapshot::from_raw(&interval_event(2310.0, 0, 900.0, 1000.0)).unwrap(),
        ];
        assert_eq!(match_length_seconds(&snapshots), 2400.0);
        assert_eq!(match_length_seconds(&[]), 0.0);
    }
}
