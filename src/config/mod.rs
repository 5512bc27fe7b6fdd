//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::RATE_ELIGIBLE_COLUMNS;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Aggregation engine configuration.
///
/// Validated once at construction; the engine never re-reads configuration
/// mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Time block width in minutes
    #[serde(default = "default_block_minutes")]
    pub block_minutes: u32,

    /// Cumulative counters reported as per-minute rates
    #[serde(default = "default_rate_columns")]
    pub rate_columns: Vec<String>,

    /// Benchmark percentile compared against
    #[serde(default = "default_benchmark_percentile")]
    pub benchmark_percentile: u8,
}

fn default_block_minutes() -> u32 {
    10
}

fn default_rate_columns() -> Vec<String> {
    vec!["gold".to_string(), "xp".to_string()]
}

fn default_benchmark_percentile() -> u8 {
    50
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            block_minutes: default_block_minutes(),
            rate_columns: default_rate_columns(),
            benchmark_percentile: default_benchmark_percentile(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "block width must be at least one minute".to_string(),
            ));
        }

        if self.benchmark_percentile > 100 {
            return Err(ConfigError::ValidationError(format!(
                "benchmark percentile must be 0-100, got {}",
                self.benchmark_percentile
            )));
        }

        for column in &self.rate_columns {
            if !RATE_ELIGIBLE_COLUMNS.contains(&column.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "'{column}' is not a rate-eligible interval counter (expected one of: {})",
                    RATE_ELIGIBLE_COLUMNS.join(", ")
                )));
            }
        }

        Ok(())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the hero name table
    #[serde(default = "default_heroes_path")]
    pub heroes_path: PathBuf,

    /// Path to the benchmark table
    #[serde(default = "default_benchmarks_path")]
    pub benchmarks_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_heroes_path() -> PathBuf {
    PathBuf::from("./data/heroes.json")
}

fn default_benchmarks_path() -> PathBuf {
    PathBuf::from("./data/benchmarks.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            heroes_path: default_heroes_path(),
            benchmarks_path: default_benchmarks_path(),
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()
    }
}
