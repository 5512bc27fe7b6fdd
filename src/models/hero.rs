//! Hero name table.
//!
//! Maps hero ids to internal and localized names. Loaded once at startup
//! from the heroes JSON file (stringified-integer keys) and read-only
//! afterwards, so it can be shared across concurrently processed matches.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::HERO_UNIT_PREFIX;

/// Errors loading a lookup table from disk.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid table key: {0}")]
    InvalidKey(String),
}

/// Names for one hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroInfo {
    /// Internal unit name, e.g. `npc_dota_hero_axe`
    pub name: String,

    /// Human-readable name, e.g. `Axe`
    pub localized_name: String,
}

impl HeroInfo {
    /// Display name with the internal unit prefix stripped, should the
    /// localized name carry it.
    pub fn display_name(&self) -> &str {
        self.localized_name
            .strip_prefix(HERO_UNIT_PREFIX)
            .unwrap_or(&self.localized_name)
    }
}

/// Hero id → names lookup table.
#[derive(Debug, Clone, Default)]
pub struct HeroTable {
    heroes: HashMap<u32, HeroInfo>,
}

impl HeroTable {
    pub fn new(heroes: HashMap<u32, HeroInfo>) -> Self {
        Self { heroes }
    }

    /// Load from a JSON file shaped `{"1": {"name": ..., "localized_name": ...}}`.
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string with stringified-integer keys.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: HashMap<String, HeroInfo> = serde_json::from_str(json)?;
        let mut heroes = HashMap::with_capacity(raw.len());
        for (key, info) in raw {
            let id: u32 = key
                .parse()
                .map_err(|_| TableError::InvalidKey(key.clone()))?;
            heroes.insert(id, info);
        }
        Ok(Self { heroes })
    }

    pub fn get(&self, hero_id: u32) -> Option<&HeroInfo> {
        self.heroes.get(&hero_id)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
