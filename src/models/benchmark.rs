//! Percentile benchmark table.
//!
//! Per-hero, per-percentile reference rates used to contextualize a
//! player's end-of-match totals. The source file maps hero id →
//! statistic name → percentile → value; loading normalizes that into one
//! `Benchmark` record per (hero, percentile). Loaded once, read-only for
//! the rest of the run.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::hero::TableError;

/// Reference rates for one hero at one percentile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub gold_per_min: f64,
    pub xp_per_min: f64,
    pub kills_per_min: f64,
    pub last_hits_per_min: f64,
    pub hero_damage_per_min: f64,
    pub hero_healing_per_min: f64,
    pub tower_damage: f64,
}

impl Benchmark {
    fn set_stat(&mut self, name: &str, value: f64) {
        match name {
            "gold_per_min" => self.gold_per_min = value,
            "xp_per_min" => self.xp_per_min = value,
            "kills_per_min" => self.kills_per_min = value,
            "last_hits_per_min" => self.last_hits_per_min = value,
            "hero_damage_per_min" => self.hero_damage_per_min = value,
            "hero_healing_per_min" => self.hero_healing_per_min = value,
            "tower_damage" => self.tower_damage = value,
            // Stats we don't report are ignored.
            _ => {}
        }
    }
}

/// Hero × percentile benchmark lookup table.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    benchmarks: HashMap<u32, HashMap<u8, Benchmark>>,
}

impl BenchmarkTable {
    /// Load from a JSON file shaped
    /// `{"1": {"gold_per_min": {"50": 412.0, ...}, ...}, ...}`.
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and normalize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: HashMap<String, HashMap<String, HashMap<String, f64>>> =
            serde_json::from_str(json)?;

        let mut benchmarks = HashMap::with_capacity(raw.len());
        for (hero_key, stats) in raw {
            let hero_id: u32 = hero_key
                .parse()
                .map_err(|_| TableError::InvalidKey(hero_key.clone()))?;

            let mut by_percentile: HashMap<u8, Benchmark> = HashMap::new();
            for (stat_name, values) in &stats {
                for (percentile_key, value) in values {
                    let percentile: u8 = percentile_key
                        .parse()
                        .map_err(|_| TableError::InvalidKey(percentile_key.clone()))?;
                    by_percentile
                        .entry(percentile)
                        .or_default()
                        .set_stat(stat_name, *value);
                }
            }
            benchmarks.insert(hero_id, by_percentile);
        }

        Ok(Self { benchmarks })
    }

    /// Look up the benchmark for a hero at a percentile. Absence of either
    /// key is a configuration problem the caller must surface, never
    /// silently default.
    pub fn get(&self, hero_id: u32, percentile: u8) -> Option<&Benchmark> {
        self.benchmarks.get(&hero_id)?.get(&percentile)
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}
