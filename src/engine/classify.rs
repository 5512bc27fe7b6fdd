//! Event classification and validation.
//!
//! Splits one match's raw event stream into the three typed sub-streams
//! the aggregators consume, and verifies up front that everything the
//! interval aggregator will read is actually present. The kind decision is
//! made exactly once, here; downstream code never re-branches on the raw
//! `type` tag.

use crate::models::{BuildingKill, DamageEvent, EventKind, IntervalSnapshot, RawEvent};

use super::EngineError;

/// Interval fields the aggregation pipeline always reads, independent of
/// which columns are configured for rate treatment.
const REQUIRED_INTERVAL_FIELDS: &[&str] = &[
    "time",
    "slot",
    "hero_id",
    "level",
    "teamfight_participation",
    "kills",
    "deaths",
    "assists",
    "denies",
    "lh",
];

/// The typed sub-streams of one match, in original event order.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedStreams {
    pub intervals: Vec<IntervalSnapshot>,
    pub damage: Vec<DamageEvent>,
    pub building_kills: Vec<BuildingKill>,
}

/// Partition the raw stream by event kind and convert to typed records.
///
/// Fails with [`EngineError::CorruptedData`] if any of the three required
/// kinds is entirely absent, or if the interval sub-stream never populates
/// a field the aggregator needs (including every configured rate column).
pub fn classify(
    events: &[RawEvent],
    rate_columns: &[String],
) -> Result<ClassifiedStreams, EngineError> {
    let mut interval_raw: Vec<&RawEvent> = Vec::new();
    let mut damage_raw: Vec<&RawEvent> = Vec::new();
    let mut building_raw: Vec<&RawEvent> = Vec::new();

    for event in events {
        match event.kind() {
            Some(EventKind::Interval) => interval_raw.push(event),
            Some(EventKind::HeroDamage) => damage_raw.push(event),
            Some(EventKind::BuildingKill) => building_raw.push(event),
            // Replays carry many other combat log kinds; they are not ours.
            None => {}
        }
    }

    let missing_kinds: Vec<&str> = [
        (EventKind::Interval, interval_raw.is_empty()),
        (EventKind::HeroDamage, damage_raw.is_empty()),
        (EventKind::BuildingKill, building_raw.is_empty()),
    ]
    .iter()
    .filter(|(_, empty)| *empty)
    .map(|(kind, _)| kind.discriminator())
    .collect();

    if !missing_kinds.is_empty() {
        return Err(EngineError::CorruptedData(format!(
            "event stream contains no events of type: {}",
            missing_kinds.join(", ")
        )));
    }

    validate_interval_fields(&interval_raw, rate_columns)?;

    Ok(ClassifiedStreams {
        intervals: interval_raw
            .iter()
            .filter_map(|e| IntervalSnapshot::from_raw(e))
            .collect(),
        damage: damage_raw
            .iter()
            .filter_map(|e| DamageEvent::from_raw(e))
            .collect(),
        building_kills: building_raw
            .iter()
            .filter_map(|e| BuildingKill::from_raw(e))
            .collect(),
    })
}

/// A field counts as present when at least one interval event carries it;
/// individual events are allowed to omit it (absent values aggregate as
/// zero).
fn validate_interval_fields(
    intervals: &[&RawEvent],
    rate_columns: &[String],
) -> Result<(), EngineError> {
    let mut required: Vec<&str> = REQUIRED_INTERVAL_FIELDS.to_vec();
    for column in rate_columns {
        if !required.contains(&column.as_str()) {
            required.push(column);
        }
    }

    let mut missing: Vec<&str> = required
        .into_iter()
        .filter(|field| !intervals.iter().any(|e| e.interval_field(field).is_some()))
        .collect();
    missing.sort_unstable();

    if !missing.is_empty() {
        return Err(EngineError::CorruptedData(format!(
            "interval events are missing required fields: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}
