use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use replay_summary::config::{AppConfig, EngineConfig};
use replay_summary::engine::SummaryEngine;
use replay_summary::ingest::{summarize_directory, summarize_replay_file};
use replay_summary::models::{BenchmarkTable, HeroTable};
use replay_summary::storage::write_summary_report;

#[derive(Parser)]
#[command(name = "replay-summary")]
#[command(about = "Aggregate parsed Dota 2 replays into per-player match summaries")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a single replay file
    Summarize {
        /// Replay JSONL file (one event per line)
        replay: PathBuf,

        /// Where to write the summary report (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the hero table path
        #[arg(long)]
        heroes: Option<PathBuf>,

        /// Override the benchmark table path
        #[arg(long)]
        benchmarks: Option<PathBuf>,

        /// Override the time block width in minutes
        #[arg(long)]
        block_minutes: Option<u32>,

        /// Override the benchmark percentile
        #[arg(long)]
        percentile: Option<u8>,
    },

    /// Summarize every replay in a directory
    Batch {
        /// Directory of *.jsonlines replay files
        dir: PathBuf,

        /// Directory to write summary reports into
        #[arg(long, default_value = "./summaries")]
        out_dir: PathBuf,

        /// Override the hero table path
        #[arg(long)]
        heroes: Option<PathBuf>,

        /// Override the benchmark table path
        #[arg(long)]
        benchmarks: Option<PathBuf>,

        /// Override the time block width in minutes
        #[arg(long)]
        block_minutes: Option<u32>,

        /// Override the benchmark percentile
        #[arg(long)]
        percentile: Option<u8>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let fmt_layer = if cli.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    tracing::info!("Starting replay-summary v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        tracing::debug!("No config file at {:?}, using defaults", config_path);
        AppConfig::default()
    };

    match cli.command {
        Commands::Summarize {
            replay,
            out,
            heroes,
            benchmarks,
            block_minutes,
            percentile,
        } => {
            let engine = build_engine(&config, heroes, benchmarks, block_minutes, percentile)?;
            let report = summarize_replay_file(&engine, &replay)
                .with_context(|| format!("Failed to summarize {}", replay.display()))?;

            match out {
                Some(path) => {
                    write_summary_report(&path, &report)?;
                    println!("Wrote summary to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }

        Commands::Batch {
            dir,
            out_dir,
            heroes,
            benchmarks,
            block_minutes,
            percentile,
        } => {
            let engine = build_engine(&config, heroes, benchmarks, block_minutes, percentile)?;
            let result = summarize_directory(&engine, &dir, &out_dir)
                .with_context(|| format!("Batch over {} failed", dir.display()))?;

            println!(
                "Processed {} matches ({} corrupted, {} failed)",
                result.processed,
                result.corrupted.len(),
                result.failed.len()
            );
            for (path, reason) in &result.corrupted {
                println!("  skipped {}: {}", path.display(), reason);
            }
            for (path, reason) in &result.failed {
                println!("  failed {}: {}", path.display(), reason);
            }
            if !result.failed.is_empty() {
                anyhow::bail!("{} matches failed", result.failed.len());
            }
        }
    }

    Ok(())
}

/// Build the engine from config with CLI overrides applied on top.
fn build_engine(
    config: &AppConfig,
    heroes: Option<PathBuf>,
    benchmarks: Option<PathBuf>,
    block_minutes: Option<u32>,
    percentile: Option<u8>,
) -> Result<SummaryEngine> {
    let heroes_path = heroes.unwrap_or_else(|| config.heroes_path.clone());
    let benchmarks_path = benchmarks.unwrap_or_else(|| config.benchmarks_path.clone());

    let hero_table = HeroTable::from_file(&heroes_path)
        .with_context(|| format!("Failed to load hero table from {}", heroes_path.display()))?;
    let benchmark_table = BenchmarkTable::from_file(&benchmarks_path).with_context(|| {
        format!(
            "Failed to load benchmark table from {}",
            benchmarks_path.display()
        )
    })?;

    let engine_config = EngineConfig {
        block_minutes: block_minutes.unwrap_or(config.engine.block_minutes),
        benchmark_percentile: percentile.unwrap_or(config.engine.benchmark_percentile),
        rate_columns: config.engine.rate_columns.clone(),
    };
    engine_config.validate()?;

    tracing::info!(
        "Engine ready: {} heroes, {} benchmark entries, {} minute blocks",
        hero_table.len(),
        benchmark_table.len(),
        engine_config.block_minutes
    );

    Ok(SummaryEngine::new(hero_table, benchmark_table, engine_config))
}
