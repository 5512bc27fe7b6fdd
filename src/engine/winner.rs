//! Match winner extraction.

use crate::models::{BuildingKill, Team};

use super::EngineError;

/// The radiant side's enemy base structure. Its destruction ends the match
/// with a radiant win.
const BADGUYS_FORT: &str = "npc_dota_badguys_fort";

/// Determine the winner from the building-kill sub-stream, in original
/// event order: the last destroyed building decides. The stream is
/// guaranteed non-empty by classification, but an empty one is still a
/// corrupted-data error rather than a panic.
pub fn extract(building_kills: &[BuildingKill]) -> Result<Team, EngineError> {
    let last = building_kills.last().ok_or_else(|| {
        EngineError::CorruptedData("no building destruction events in stream".to_string())
    })?;

    if last.target == BADGUYS_FORT {
        Ok(Team::Radiant)
    } else {
        Ok(Team::Dire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(time: f64, target: &str) -> BuildingKill {
        BuildingKill {
            time,
            target: target.to_string(),
        }
    }

    #[test]
    fn test_radiant_wins_when_badguys_fort_falls_last() {
        let kills = vec![
            kill(900.0, "npc_dota_goodguys_tower1_mid"),
            kill(2100.0, "npc_dota_badguys_fort"),
        ];
        assert_eq!(extract(&kills).unwrap(), Team::Radiant);
    }

    #[test]
    fn test_dire_wins_otherwise() {
        let kills = vec![
            kill(900.0, "npc_dota_badguys_tower1_mid"),
            kill(2100.0, "npc_dota_goodguys_fort"),
        ];
        assert_eq!(extract(&kills).unwrap(), Team::Dire);
    }

    #[test]
    fn test_only_last_event_matters() {
        // A badguys fort kill earlier in the stream does not decide.
        let kills = vec![
            kill(1800.0, "npc_dota_badguys_fort"),
            kill(2100.0, "npc_dota_goodguys_fort"),
        ];
        assert_eq!(extract(&kills).unwrap(), Team::Dire);
    }

    #[test]
    fn test_empty_stream_is_corrupted_data() {
        assert!(matches!(
            extract(&[]),
            Err(EngineError::CorruptedData(_))
        ));
    }
}
