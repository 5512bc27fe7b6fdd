//! Teams and player slots.

use serde::{Deserialize, Serialize};

/// Number of player slots in a match. Slots are fixed seat indices 0-9.
pub const MAX_PLAYERS: u8 = 10;

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Radiant,
    Dire,
}

impl Team {
    /// Team membership is determined by slot range: 0-4 radiant, 5-9 dire.
    pub fn from_slot(slot: u8) -> Self {
        if slot < 5 {
            Team::Radiant
        } else {
            Team::Dire
        }
    }

    /// The opposing side.
    pub fn opponent(&self) -> Self {
        match self {
            Team::Radiant => Team::Dire,
            Team::Dire => Team::Radiant,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Radiant => write!(f, "radiant"),
            Team::Dire => write!(f, "dire"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_from_slot() {
        for slot in 0..5 {
            assert_eq!(Team::from_slot(slot), Team::Radiant);
        }
        for slot in 5..MAX_PLAYERS {
            assert_eq!(Team::from_slot(slot), Team::Dire);
        }
    }

    #[test]
    fn test_team_display() {
        assert_eq!(format!("{}", Team::Radiant), "radiant");
        assert_eq!(format!("{}", Team::Dire), "dire");
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Radiant.opponent(), Team::Dire);
        assert_eq!(Team::Dire.opponent(), Team::Radiant);
    }

    #[test]
    fn test_team_serialization() {
        assert_eq!(serde_json::to_string(&Team::Radiant).unwrap(), "\"radiant\"");
        let team: Team = serde_json::from_str("\"dire\"").unwrap();
        assert_eq!(team, Team::Dire);
    }
}
