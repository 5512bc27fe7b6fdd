//! Raw replay events and their typed sub-stream records.
//!
//! A parsed replay is a line-delimited stream of heterogeneous records
//! discriminated by a `type` field. The engine only cares about three of
//! them: per-player interval snapshots, hero damage instances, and team
//! building kills. Classification into typed records happens once, at
//! ingestion; everything downstream works on the typed forms.

use serde::{Deserialize, Deserializer, Serialize};

/// Name prefix identifying hero units in combat log events.
pub const HERO_UNIT_PREFIX: &str = "npc_dota_hero_";

/// Cumulative interval counters eligible for per-minute-rate treatment.
pub const RATE_ELIGIBLE_COLUMNS: &[&str] =
    &["gold", "xp", "lh", "denies", "kills", "deaths", "assists"];

/// The three event kinds the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Interval,
    HeroDamage,
    BuildingKill,
}

impl EventKind {
    /// All kinds a valid stream must contain.
    pub const ALL: [EventKind; 3] = [
        EventKind::Interval,
        EventKind::HeroDamage,
        EventKind::BuildingKill,
    ];

    /// The `type` discriminator value for this kind.
    pub fn discriminator(&self) -> &'static str {
        match self {
            EventKind::Interval => "interval",
            EventKind::HeroDamage => "DOTA_COMBATLOG_DAMAGE",
            EventKind::BuildingKill => "DOTA_COMBATLOG_TEAM_BUILDING_KILL",
        }
    }

    /// Map a raw discriminator to a kind, if it is one the engine handles.
    pub fn from_discriminator(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.discriminator() == raw)
    }
}

/// One raw replay event, as deserialized from a JSONL line.
///
/// The record is heterogeneous: which fields are populated depends on the
/// `type` discriminator. Events are never mutated after ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event type discriminator
    #[serde(rename = "type")]
    pub event_type: String,

    /// Seconds since match start (negative for pre-match events)
    pub time: Option<f64>,

    /// Player slot (interval events)
    pub slot: Option<u8>,

    /// Hero id (interval events)
    pub hero_id: Option<u32>,

    /// Hero level (interval events)
    pub level: Option<u32>,

    /// Cumulative gold
    pub gold: Option<f64>,

    /// Cumulative experience
    pub xp: Option<f64>,

    /// Cumulative last hits
    pub lh: Option<f64>,

    /// Cumulative denies
    pub denies: Option<f64>,

    /// Cumulative kills
    pub kills: Option<f64>,

    /// Cumulative deaths
    pub deaths: Option<f64>,

    /// Cumulative assists
    pub assists: Option<f64>,

    /// Seconds spent in teamfights since the previous snapshot
    pub teamfight_participation: Option<f64>,

    /// Attacking unit name (combat log events)
    pub attackername: Option<String>,

    /// Target unit name (combat log events)
    pub targetname: Option<String>,

    /// Damage amount (combat log events)
    pub value: Option<f64>,

    /// Whether the attacker is a hero (combat log events)
    #[serde(default, deserialize_with = "flag_or_int")]
    pub attackerhero: Option<bool>,

    /// Whether the target is a hero (combat log events)
    #[serde(default, deserialize_with = "flag_or_int")]
    pub targethero: Option<bool>,
}

/// Parser output encodes hero flags as booleans or 0/1 depending on the
/// lineage; accept both.
fn flag_or_int<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }))
}

impl RawEvent {
    /// The kind of this event, if the engine handles it.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_discriminator(&self.event_type)
    }

    /// Read an interval counter by column name. Returns `None` both for
    /// unknown names and for fields absent from this event, which is what
    /// the field-presence validation keys off.
    pub fn interval_field(&self, name: &str) -> Option<f64> {
        match name {
            "time" => self.time,
            "slot" => self.slot.map(f64::from),
            "hero_id" => self.hero_id.map(f64::from),
            "level" => self.level.map(f64::from),
            "gold" => self.gold,
            "xp" => self.xp,
            "lh" => self.lh,
            "denies" => self.denies,
            "kills" => self.kills,
            "deaths" => self.deaths,
            "assists" => self.assists,
            "teamfight_participation" => self.teamfight_participation,
            _ => None,
        }
    }
}

/// One interval event's cumulative counters for one slot at one timestamp.
///
/// Counters stay optional here: a snapshot may omit any of them, and the
/// aggregators treat absent values as contributing nothing (zero at the
/// output edge), never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSnapshot {
    pub time: f64,
    pub slot: u8,
    pub hero_id: Option<u32>,
    pub level: Option<u32>,
    pub gold: Option<f64>,
    pub xp: Option<f64>,
    pub last_hits: Option<f64>,
    pub denies: Option<f64>,
    pub kills: Option<f64>,
    pub deaths: Option<f64>,
    pub assists: Option<f64>,
    pub teamfight_participation: Option<f64>,
}

impl IntervalSnapshot {
    /// A snapshot needs a timestamp to bucket and a slot to group; events
    /// missing either cannot participate in aggregation.
    pub fn from_raw(event: &RawEvent) -> Option<Self> {
        let time = event.time?;
        let slot = event.slot?;
        Some(Self {
            time,
            slot,
            hero_id: event.hero_id,
            level: event.level,
            gold: event.gold,
            xp: event.xp,
            last_hits: event.lh,
            denies: event.denies,
            kills: event.kills,
            deaths: event.deaths,
            assists: event.assists,
            teamfight_participation: event.teamfight_participation,
        })
    }

    /// Read a cumulative counter by rate-column name.
    pub fn counter(&self, name: &str) -> Option<f64> {
        match name {
            "gold" => self.gold,
            "xp" => self.xp,
            "lh" => self.last_hits,
            "denies" => self.denies,
            "kills" => self.kills,
            "deaths" => self.deaths,
            "assists" => self.assists,
            _ => None,
        }
    }
}

/// One damage instance between two named units.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    pub time: f64,
    pub attacker: String,
    pub target: String,
    pub attacker_is_hero: bool,
    pub target_is_hero: bool,
    pub value: f64,
}

impl DamageEvent {
    pub fn from_raw(event: &RawEvent) -> Option<Self> {
        Some(Self {
            time: event.time?,
            attacker: event.attackername.clone()?,
            target: event.targetname.clone()?,
            attacker_is_hero: event.attackerhero.unwrap_or(false),
            target_is_hero: event.targethero.unwrap_or(false),
            value: event.value?,
        })
    }

    /// True when both ends of the event are identified hero units: name
    /// prefix and explicit hero flag must both hold, on both sides.
    pub fn is_hero_to_hero(&self) -> bool {
        self.attacker.starts_with(HERO_UNIT_PREFIX)
            && self.target.starts_with(HERO_UNIT_PREFIX)
            && self.attacker_is_hero
            && self.target_is_hero
    }
}

/// One team building destruction.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingKill {
    pub time: f64,
    pub target: String,
}

impl BuildingKill {
    pub fn from_raw(event: &RawEvent) -> Option<Self> {
        Some(Self {
            time: event.time.unwrap_or(0.0),
            target: event.targetname.clone()?,
        })
    }
}
