//! Final per-player match summary structures.
//!
//! Field names serialize to the exact keys the downstream report
//! generation expects ("gold per minute", "Total gold", ...), so the JSON
//! output matches the reference pipeline's.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::benchmark::Benchmark;
use super::team::Team;

/// Round to one decimal place, as reported for KDA values.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One block's stats as reported per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStats {
    pub minute: i64,

    #[serde(rename = "gold per minute")]
    pub gold_per_minute: i64,

    #[serde(rename = "last hits")]
    pub last_hits: i64,

    pub denies: i64,

    #[serde(rename = "xp per minute")]
    pub xp_per_minute: i64,

    pub kills: i64,

    pub deaths: i64,

    pub assists: i64,

    #[serde(rename = "KDA")]
    pub kda: f64,

    #[serde(rename = "damage per minute")]
    pub damage_per_minute: i64,

    #[serde(rename = "teamfight seconds")]
    pub teamfight_seconds: i64,
}

/// True end-of-match totals read from a player's terminal snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    #[serde(rename = "Total gold")]
    pub gold: i64,

    #[serde(rename = "Total last hits")]
    pub last_hits: i64,

    #[serde(rename = "Total denies")]
    pub denies: i64,

    #[serde(rename = "Total xp")]
    pub xp: i64,

    #[serde(rename = "Total kills")]
    pub kills: i64,

    #[serde(rename = "Total deaths")]
    pub deaths: i64,

    #[serde(rename = "Total assists")]
    pub assists: i64,

    #[serde(rename = "Total KDA")]
    pub kda: f64,

    #[serde(rename = "Total damage")]
    pub damage: i64,
}

/// Benchmark reference totals scaled to this match's length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTotals {
    #[serde(rename = "Total gold")]
    pub gold: i64,

    #[serde(rename = "Total xp")]
    pub xp: i64,

    #[serde(rename = "Total kills")]
    pub kills: i64,

    #[serde(rename = "Total last hits")]
    pub last_hits: i64,

    #[serde(rename = "Total damage")]
    pub damage: i64,
}

impl BenchmarkTotals {
    /// Scale per-minute benchmark rates to the match length. Gold, xp and
    /// damage truncate toward zero; kills and last hits use standard
    /// rounding. The split is a pinned policy, not an accident.
    pub fn for_match(benchmark: &Benchmark, match_length_seconds: f64) -> Self {
        let minutes = match_length_seconds / 60.0;
        Self {
            gold: (benchmark.gold_per_min * minutes).trunc() as i64,
            xp: (benchmark.xp_per_min * minutes).trunc() as i64,
            kills: (benchmark.kills_per_min * minutes).round() as i64,
            last_hits: (benchmark.last_hits_per_min * minutes).round() as i64,
            damage: (benchmark.hero_damage_per_min * minutes).trunc() as i64,
        }
    }
}

/// Complete summary for one player slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Team, determined by slot range
    pub team: Team,

    /// Whether this player's team won
    pub win: bool,

    /// Hero display name
    pub hero: String,

    /// Block width in minutes the stats are windowed by
    pub interval: u32,

    /// Per-block stats, ascending by minute
    pub stats: Vec<BlockStats>,

    /// End-of-match totals
    #[serde(rename = "final stats")]
    pub final_stats: FinalStats,

    /// Benchmark comparison totals
    pub benchmarks: BenchmarkTotals,
}

/// Top-level output for one processed match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Where the replay came from (file path or match id)
    pub source: String,

    /// When this report was computed
    pub computed_at: DateTime<Utc>,

    /// Block width in minutes
    pub block_minutes: u32,

    /// Benchmark percentile compared against
    pub benchmark_percentile: u8,

    /// Per-slot summaries, keyed by slot index 0-9
    pub players: BTreeMap<u8, MatchSummary>,
}
