//! Filesystem operations: replay event streams in, summary reports out.

use std::path::PathBuf;
use thiserror::Error;

mod jsonl;

pub use jsonl::{read_replay_events, write_summary_report, JsonlReader};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}
