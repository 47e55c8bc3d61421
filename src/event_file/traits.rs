use anyhow::{anyhow, Context, Error, Result};
use csv::StringRecord;
use fixed_map::Key;
use itertools::Itertools;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

pub type RetrosheetEventRecord = StringRecord;

pub trait FromRetrosheetRecord {
    fn new(record: &RetrosheetEventRecord) -> Result<Self>
    where
        Self: Sized;

    fn error(msg: &str, record: &RetrosheetEventRecord) -> Error {
        anyhow!("{}\nRecord: {}", msg, raw_line(record))
    }
}

/// Rebuilds the comma-delimited line a record was read from, for error messages.
pub fn raw_line(record: &RetrosheetEventRecord) -> String {
    record.iter().join(",")
}

/// 1-based line number of a record within its file, if known.
pub fn line_number(record: &RetrosheetEventRecord) -> Option<u64> {
    record.position().map(csv::Position::line)
}

#[derive(Debug, Eq, PartialEq, EnumString, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Side {
    #[strum(serialize = "0")]
    Away,
    #[strum(serialize = "1")]
    Home,
}

impl Side {
    pub const fn flip(self) -> Self {
        match self {
            Self::Away => Self::Home,
            Self::Home => Self::Away,
        }
    }

    pub const fn is_home(self) -> bool {
        matches!(self, Self::Home)
    }
}

#[derive(Debug, Default, Eq, PartialEq, Clone, Copy)]
pub struct Matchup<T> {
    pub away: T,
    pub home: T,
}

impl<T> Matchup<T> {
    pub const fn get(&self, side: Side) -> &T {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }
}

#[derive(Debug, Eq, PartialEq, TryFromPrimitive, IntoPrimitive, Copy, Clone, Hash, Serialize)]
#[repr(u8)]
pub enum LineupPosition {
    PitcherWithDH = 0,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
}

impl TryFrom<&str> for LineupPosition {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.parse::<u8>()?).context("Unable to convert to lineup position")
    }
}

#[derive(
    Debug, Eq, PartialEq, TryFromPrimitive, IntoPrimitive, Copy, Clone, Hash, Key, Serialize,
)]
#[repr(u8)]
pub enum FieldingPosition {
    Unknown = 0,
    Pitcher,
    Catcher,
    FirstBaseman,
    SecondBaseman,
    ThirdBaseman,
    Shortstop,
    LeftFielder,
    CenterFielder,
    RightFielder,
    DesignatedHitter,
    PinchHitter,
    PinchRunner,
}

impl TryFrom<&str> for FieldingPosition {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.parse::<u8>()?).context("Unable to convert to fielding position")
    }
}

pub type Inning = u8;

pub type Person = String;
pub type Player = Person;
pub type Umpire = Person;
pub type Batter = Player;
pub type Pitcher = Player;

pub type Team = String;
pub type Park = String;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn side_follows_retrosheet_flag() {
        assert_eq!(Side::from_str("0").ok(), Some(Side::Away));
        assert_eq!(Side::from_str("1").ok(), Some(Side::Home));
        assert!(Side::from_str("2").is_err());
        assert_eq!(Side::Home.flip(), Side::Away);
    }

    #[test]
    fn positions_parse_from_digits() {
        assert_eq!(
            FieldingPosition::try_from("1").ok(),
            Some(FieldingPosition::Pitcher)
        );
        assert_eq!(
            FieldingPosition::try_from("11").ok(),
            Some(FieldingPosition::PinchHitter)
        );
        assert!(FieldingPosition::try_from("13").is_err());
        assert_eq!(
            LineupPosition::try_from("0").ok(),
            Some(LineupPosition::PitcherWithDH)
        );
        assert!(LineupPosition::try_from("x").is_err());
    }

    #[test]
    fn raw_line_rejoins_fields() {
        let record = StringRecord::from(vec!["play", "1", "0", "abreb001", "32", "CBFFX", "S7"]);
        assert_eq!(raw_line(&record), "play,1,0,abreb001,32,CBFFX,S7");
    }
}
