//! JSONL (JSON Lines) replay input and summary output.
//!
//! A parsed replay is one JSON object per line. Lines that fail to parse
//! are logged and skipped rather than failing the whole file; whether the
//! surviving stream is usable is the engine's call, not storage's.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::StorageError;
use crate::models::{RawEvent, SummaryReport};

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. Blank lines are ignored and
    /// unparseable lines are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();
        let mut line_num = 0;

        for line in reader.lines() {
            line_num += 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        line_num, self.path, e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Materialize one match's raw event stream from a replay JSONL file.
pub fn read_replay_events(path: &Path) -> Result<Vec<RawEvent>, StorageError> {
    JsonlReader::new(path.to_path_buf()).read_all()
}

/// Write a summary report as pretty-printed JSON.
pub fn write_summary_report(path: &Path, report: &SummaryReport) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    debug!("Wrote summary report to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_read_replay_events_skips_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.jsonlines");
        std::fs::write(
            &path,
            concat!(
                r#"{"type": "interval", "time": 60, "slot": 0, "gold": 100}"#,
                "\n",
                "\n",
                "not json at all\n",
                r#"{"type": "DOTA_COMBATLOG_DAMAGE", "time": 61, "value": 40}"#,
                "\n",
            ),
        )
        .unwrap();

        let events = read_replay_events(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "interval");
        assert_eq!(events[1].event_type, "DOTA_COMBATLOG_DAMAGE");
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_replay_events(&dir.path().join("nope.jsonlines"));
        assert!(matches!(result, Err(StorageError::PathNotFound(_))));
    }

    #[test]
    fn test_write_summary_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/summary.json");

        let report = SummaryReport {
            source: "match-123".to_string(),
            computed_at: chrono::Utc::now(),
            block_minutes: 10,
            benchmark_percentile: 50,
            players: BTreeMap::new(),
        };
        write_summary_report(&path, &report).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: SummaryReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.source, "match-123");
        assert_eq!(parsed.block_minutes, 10);
    }

}
