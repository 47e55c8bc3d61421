use anyhow::Result;
use fixed_map::Map;

use crate::event_file::misc::AppearanceRecord;
use crate::event_file::traits::{
    FieldingPosition, LineupPosition, Matchup, Pitcher, Player, RetrosheetEventRecord, Side,
};

/// Whoever currently occupies a fielding position.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct RosterSlot {
    pub player: Player,
    pub player_name: String,
    pub lineup_position: LineupPosition,
    pub fielding_position: FieldingPosition,
}

impl From<AppearanceRecord> for RosterSlot {
    fn from(record: AppearanceRecord) -> Self {
        Self {
            player: record.player,
            player_name: record.player_name,
            lineup_position: record.lineup_position,
            fielding_position: record.fielding_position,
        }
    }
}

type Defense = Map<FieldingPosition, RosterSlot>;

/// Current defensive alignment of both teams. Only the latest assignment per
/// position is kept; substitutions overwrite in place.
pub struct RosterTracker {
    defense: Matchup<Defense>,
}

impl Default for RosterTracker {
    fn default() -> Self {
        Self {
            defense: Matchup {
                away: Map::new(),
                home: Map::new(),
            },
        }
    }
}

impl RosterTracker {
    /// Applies a `start` or `sub` line. Returns the parsed appearance, or `None`
    /// if the line was too short to use.
    pub fn update(&mut self, record: &RetrosheetEventRecord) -> Result<Option<AppearanceRecord>> {
        let Some(appearance) = AppearanceRecord::from_line(record)? else {
            return Ok(None);
        };
        self.assign(appearance.clone());
        Ok(Some(appearance))
    }

    pub fn assign(&mut self, appearance: AppearanceRecord) {
        let side = appearance.side;
        let position = appearance.fielding_position;
        self.defense
            .get_mut(side)
            .insert(position, RosterSlot::from(appearance));
    }

    pub fn at_position(&self, side: Side, position: FieldingPosition) -> Option<&RosterSlot> {
        self.defense.get(side).get(position)
    }

    pub fn pitcher(&self, side: Side) -> Option<&Pitcher> {
        self.at_position(side, FieldingPosition::Pitcher)
            .map(|slot| &slot.player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(fields: Vec<&str>) -> RetrosheetEventRecord {
        RetrosheetEventRecord::from(fields)
    }

    #[test]
    fn starters_fill_positions() {
        let mut roster = RosterTracker::default();
        roster
            .update(&line(vec!["start", "hernf002", "Felix Hernandez", "0", "0", "1"]))
            .unwrap();
        roster
            .update(&line(vec!["start", "weavj003", "Jered Weaver", "1", "0", "1"]))
            .unwrap();
        roster
            .update(&line(vec!["start", "abreb001", "Bobby Abreu", "1", "2", "9"]))
            .unwrap();

        assert_eq!(roster.pitcher(Side::Away).map(String::as_str), Some("hernf002"));
        assert_eq!(roster.pitcher(Side::Home).map(String::as_str), Some("weavj003"));
        let rf = roster
            .at_position(Side::Home, FieldingPosition::RightFielder)
            .unwrap();
        assert_eq!(rf.player_name, "Bobby Abreu");
        assert_eq!(rf.lineup_position, LineupPosition::Second);
    }

    #[test]
    fn substitution_overwrites_slot() {
        let mut roster = RosterTracker::default();
        roster
            .update(&line(vec!["start", "weavj003", "Jered Weaver", "1", "0", "1"]))
            .unwrap();
        roster
            .update(&line(vec!["sub", "fuenb001", "Brian Fuentes", "1", "0", "1"]))
            .unwrap();
        assert_eq!(roster.pitcher(Side::Home).map(String::as_str), Some("fuenb001"));
        assert_eq!(roster.pitcher(Side::Away), None);
    }

    #[test]
    fn short_lines_leave_roster_unchanged() {
        let mut roster = RosterTracker::default();
        let skipped = roster
            .update(&line(vec!["sub", "fuenb001", "Brian Fuentes", "1"]))
            .unwrap();
        assert_eq!(skipped, None);
        assert_eq!(roster.pitcher(Side::Home), None);
    }
}
