//! File-level ingestion built on the aggregation engine.
//!
//! Reads materialized replay JSONL files, runs the engine, and writes
//! summary reports. Batch runs treat a corrupted match as that match's
//! problem alone: it is logged, recorded, and skipped, and the run
//! continues.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::engine::{EngineError, SummaryEngine};
use crate::models::SummaryReport;
use crate::storage::{read_replay_events, write_summary_report, StorageError};

/// Errors from file-level processing.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid replay glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Summarize one replay file into a report.
pub fn summarize_replay_file(
    engine: &SummaryEngine,
    replay_path: &Path,
) -> Result<SummaryReport, IngestError> {
    let events = read_replay_events(replay_path)?;
    info!("Read {} events from {:?}", events.len(), replay_path);

    let players = engine.process(&events)?;

    Ok(SummaryReport {
        source: replay_path.display().to_string(),
        computed_at: chrono::Utc::now(),
        block_minutes: engine.config().block_minutes,
        benchmark_percentile: engine.config().benchmark_percentile,
        players,
    })
}

/// Outcome of a batch run over a directory of replays.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Reports written successfully
    pub processed: usize,

    /// Matches skipped because their data was corrupted
    pub corrupted: Vec<(PathBuf, String)>,

    /// Matches that failed for other reasons (IO, configuration)
    pub failed: Vec<(PathBuf, String)>,
}

/// Summarize every `*.jsonlines` replay in a directory, writing one
/// `<stem>.summary.json` per match into `out_dir`.
///
/// Corrupted matches never abort the batch; they are collected on the
/// result so the caller can flag them.
pub fn summarize_directory(
    engine: &SummaryEngine,
    replay_dir: &Path,
    out_dir: &Path,
) -> Result<BatchResult, IngestError> {
    let pattern = replay_dir.join("*.jsonlines");
    let mut result = BatchResult::default();

    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable glob entry: {}", e);
                continue;
            }
        };

        match summarize_replay_file(engine, &path) {
            Ok(report) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "match".to_string());
                let out_path = out_dir.join(format!("{stem}.summary.json"));

                match write_summary_report(&out_path, &report) {
                    Ok(()) => {
                        info!("Wrote {:?}", out_path);
                        result.processed += 1;
                    }
                    Err(e) => {
                        error!("Failed to write summary for {:?}: {}", path, e);
                        result.failed.push((path, e.to_string()));
                    }
                }
            }
            Err(IngestError::Engine(err @ EngineError::CorruptedData(_))) => {
                warn!("Match {:?} is corrupted: {}", path, err);
                result.corrupted.push((path, err.to_string()));
            }
            Err(e) => {
                error!("Failed to process {:?}: {}", path, e);
                result.failed.push((path, e.to_string()));
            }
        }
    }

    info!(
        "Batch complete: {} processed, {} corrupted, {} failed",
        result.processed,
        result.corrupted.len(),
        result.failed.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{BenchmarkTable, HeroTable, MAX_PLAYERS};
    use serde_json::json;
    use std::fmt::Write as _;

    fn hero_table() -> HeroTable {
        let entries: std::collections::HashMap<String, crate::models::HeroInfo> = (1..=10)
            .map(|id: u32| {
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
        for id in 1..=10 {
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

    fn engine() -> SummaryEngine {
        SummaryEngine::new(hero_table(), benchmark_table(), EngineConfig::default())
    }

    /// A minimal valid replay: snapshots for all slots, one damage event,
    /// one building kill. `with_building` off simulates corruption.
    fn replay_jsonl(with_building: bool) -> String {
        let mut out = String::new();
        for slot in 0..MAX_PLAYERS {
            for minute in [1, 10, 20] {
                let line = json!({
                    "type": "interval",
                    "time": minute * 60,
                    "slot": slot,
                    "hero_id": slot + 1,
                    "level": minute,
                    "gold": minute * 100,
                    "xp": minute * 120,
                    "lh": minute * 4,
                    "denies": 1,
                    "kills": 1,
                    "deaths": 1,
                    "assists": 1,
                    "teamfight_participation": 0.5,
                });
                writeln!(out, "{line}").unwrap();
            }
        }
        let damage = json!({
            "type": "DOTA_COMBATLOG_DAMAGE",
            "time": 300,
            "attackername": "npc_dota_hero_1",
            "targetname": "npc_dota_hero_6",
            "attackerhero": true,
            "targethero": true,
            "value": 120,
        });
        writeln!(out, "{damage}").unwrap();
        if with_building {
            let kill = json!({
                "type": "DOTA_COMBATLOG_TEAM_BUILDING_KILL",
                "time": 1200,
                "targetname": "npc_dota_badguys_fort",
            });
            writeln!(out, "{kill}").unwrap();
        }
        out
    }

    #[test]
    fn test_summarize_replay_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("123.jsonlines");
        std::fs::write(&path, replay_jsonl(true)).unwrap();

        let report = summarize_replay_file(&engine(), &path).unwrap();
        assert_eq!(report.players.len(), usize::from(MAX_PLAYERS));
        assert_eq!(report.block_minutes, 10);
        assert!(report.players[&0].win);
    }

    #[test]
    fn test_summarize_corrupted_file_surfaces_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonlines");
        std::fs::write(&path, replay_jsonl(false)).unwrap();

        let err = summarize_replay_file(&engine(), &path).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Engine(EngineError::CorruptedData(_))
        ));
    }

    #[test]
    fn test_batch_skips_corrupted_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        std::fs::write(dir.path().join("1.jsonlines"), replay_jsonl(true)).unwrap();
        std::fs::write(dir.path().join("2.jsonlines"), replay_jsonl(false)).unwrap();
        std::fs::write(dir.path().join("3.jsonlines"), replay_jsonl(true)).unwrap();
        // Not matching the glob; ignored.
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let result = summarize_directory(&engine(), dir.path(), &out).unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.corrupted.len(), 1);
        assert!(result.failed.is_empty());
        assert!(out.join("1.summary.json").exists());
        assert!(!out.join("2.summary.json").exists());
        assert!(out.join("3.summary.json").exists());
    }
}
