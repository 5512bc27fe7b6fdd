//! # Replay Summary
//!
//! A replay telemetry aggregation engine for Dota 2 matches: turns a
//! parsed replay's event stream into per-player, per-time-block
//! performance summaries with benchmark comparison.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (events, teams, lookup tables, reports)
//! - **engine**: The aggregation pipeline (classify, bucket, join, assemble)
//! - **storage**: Replay JSONL input and summary report output
//! - **ingest**: File and directory level processing built on the engine
//! - **config**: Configuration loading and validation

pub mod config;
pub mod engine;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;
