use std::str::FromStr;

use anyhow::{Context, Result};

use crate::event_file::error::ParseError;
use crate::event_file::traits::{
    line_number, raw_line, FieldingPosition, FromRetrosheetRecord, LineupPosition, Player,
    RetrosheetEventRecord, Side,
};

/// Characters of the `id` value that precede the date descriptor (the home team code).
const GAME_ID_PREFIX_LEN: usize = 3;

/// The trailing date/number descriptor of a game's first record,
/// e.g. `201004050` from `id,ANA201004050`.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct GameId {
    pub suffix: String,
}

impl FromRetrosheetRecord for GameId {
    fn new(record: &RetrosheetEventRecord) -> Result<Self> {
        let id = record.get(1).ok_or_else(|| {
            ParseError::missing("game_id", line_number(record), raw_line(record))
        })?;
        Ok(Self {
            suffix: id.chars().skip(GAME_ID_PREFIX_LEN).collect(),
        })
    }
}

impl GameId {
    pub fn with_home_team(&self, home_team: &str) -> String {
        format!("{}{}", home_team, self.suffix)
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct AppearanceRecord {
    pub player: Player,
    pub player_name: String,
    pub side: Side,
    pub lineup_position: LineupPosition,
    pub fielding_position: FieldingPosition,
}

impl AppearanceRecord {
    pub const MIN_FIELDS: usize = 6;

    /// Returns `None` for truncated lines, which are skipped rather than rejected.
    pub fn from_line(record: &RetrosheetEventRecord) -> Result<Option<Self>> {
        if record.len() < Self::MIN_FIELDS {
            return Ok(None);
        }
        Self::new(record).map(Some)
    }
}

impl FromRetrosheetRecord for AppearanceRecord {
    fn new(record: &RetrosheetEventRecord) -> Result<Self> {
        // Trailing fields beyond the sixth are tolerated
        let field = |i: usize| {
            record
                .get(i)
                .ok_or_else(|| Self::error("Short appearance record", record))
        };
        Ok(Self {
            player: String::from(field(1)?),
            player_name: String::from(field(2)?),
            side: Side::from_str(field(3)?).context("Invalid side")?,
            lineup_position: LineupPosition::try_from(field(4)?)?,
            fielding_position: FieldingPosition::try_from(field(5)?)?,
        })
    }
}

pub type StartRecord = AppearanceRecord;
pub type SubstitutionRecord = AppearanceRecord;
