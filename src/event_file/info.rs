use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use strum_macros::EnumString;
use tracing::warn;

use crate::event_file::traits::{
    FromRetrosheetRecord, Park, Pitcher, RetrosheetEventRecord, Team, Umpire,
};
use crate::util::{non_empty, parse_positive_int};

const DATE_FORMAT: &str = "%Y/%m/%d";

#[derive(Debug, Eq, PartialEq, EnumString, Hash, Copy, Clone)]
pub enum UmpirePosition {
    #[strum(serialize = "umphome")]
    Home,
    #[strum(serialize = "ump1b")]
    First,
    #[strum(serialize = "ump2b")]
    Second,
    #[strum(serialize = "ump3b")]
    Third,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum InfoRecord {
    VisitingTeam(Team),
    HomeTeam(Team),
    GameDate(Option<NaiveDate>),
    Park(Option<Park>),
    StartTime(Option<String>),
    Day(bool),
    UseDH(bool),
    UmpireAssignment(UmpirePosition, Option<Umpire>),
    Pitches(Option<String>),
    Temp(Option<u8>),
    WindDirection(Option<String>),
    WindSpeed(Option<u8>),
    FieldCondition(Option<String>),
    Precipitation(Option<String>),
    Sky(Option<String>),
    TimeOfGame(Option<String>),
    Attendance(Option<u32>),
    WinningPitcher(Option<Pitcher>),
    LosingPitcher(Option<Pitcher>),
    SavePitcher(Option<Pitcher>),
    Unrecognized,
}

impl InfoRecord {
    fn parse_date(value: &str) -> Option<NaiveDate> {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok();
        if date.is_none() {
            warn!("Unparseable game date {:?}, leaving unset", value);
        }
        date
    }
}

impl FromRetrosheetRecord for InfoRecord {
    fn new(record: &RetrosheetEventRecord) -> Result<Self> {
        let info_type = record.get(1).unwrap_or_default();
        let value = record.get(2).unwrap_or_default();

        let s = || non_empty(value);

        type I = InfoRecord;
        let info = match info_type {
            "visteam" => I::VisitingTeam(value.to_string()),
            "hometeam" => I::HomeTeam(value.to_string()),
            "date" => I::GameDate(I::parse_date(value)),
            "site" => I::Park(s()),
            "starttime" => I::StartTime(s()),
            // Anything but an exact match is false
            "day" | "daynight" => I::Day(value == "day"),
            "usedh" => I::UseDH(value == "true"),

            "umphome" | "ump1b" | "ump2b" | "ump3b" => match UmpirePosition::from_str(info_type) {
                Ok(position) => I::UmpireAssignment(position, s()),
                Err(_) => I::Unrecognized,
            },

            "pitches" => I::Pitches(s()),
            "winddir" => I::WindDirection(s()),
            "fieldcond" | "fieldcon" => I::FieldCondition(s()),
            "precip" => I::Precipitation(s()),
            "sky" => I::Sky(s()),
            "timeofgame" => I::TimeOfGame(s()),

            "temp" => I::Temp(parse_positive_int::<u8>(value)),
            "windspeed" => I::WindSpeed(parse_positive_int::<u8>(value)),
            "attendance" => I::Attendance(parse_positive_int::<u32>(value)),

            "wp" => I::WinningPitcher(s()),
            "lp" => I::LosingPitcher(s()),
            "save" => I::SavePitcher(s()),
            _ => I::Unrecognized,
        };
        Ok(info)
    }
}

/// Game metadata accumulated from `info` lines. A field stays `None` until its
/// line appears.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct GameInfo {
    pub away_team: Option<Team>,
    pub home_team: Option<Team>,
    pub date: Option<NaiveDate>,
    pub site: Option<Park>,
    pub start_time: Option<String>,
    pub day: Option<bool>,
    pub use_dh: Option<bool>,
    pub umpire_home: Option<Umpire>,
    pub umpire_first: Option<Umpire>,
    pub umpire_second: Option<Umpire>,
    pub umpire_third: Option<Umpire>,
    pub total_pitches: Option<String>,
    pub temperature: Option<u8>,
    pub wind_direction: Option<String>,
    pub wind_speed: Option<u8>,
    pub field_condition: Option<String>,
    pub precipitation: Option<String>,
    pub sky: Option<String>,
    pub game_length: Option<String>,
    pub attendance: Option<u32>,
    pub winning_pitcher: Option<Pitcher>,
    pub losing_pitcher: Option<Pitcher>,
    pub save_pitcher: Option<Pitcher>,
}

impl GameInfo {
    /// Sets the one field the record refers to. Unrecognized records are ignored.
    pub fn update(&mut self, info: InfoRecord) {
        type I = InfoRecord;
        match info {
            I::VisitingTeam(t) => self.away_team = Some(t),
            I::HomeTeam(t) => self.home_team = Some(t),
            I::GameDate(d) => self.date = d,
            I::Park(p) => self.site = p,
            I::StartTime(t) => self.start_time = t,
            I::Day(b) => self.day = Some(b),
            I::UseDH(b) => self.use_dh = Some(b),
            I::UmpireAssignment(position, umpire) => match position {
                UmpirePosition::Home => self.umpire_home = umpire,
                UmpirePosition::First => self.umpire_first = umpire,
                UmpirePosition::Second => self.umpire_second = umpire,
                UmpirePosition::Third => self.umpire_third = umpire,
            },
            I::Pitches(p) => self.total_pitches = p,
            I::Temp(t) => self.temperature = t,
            I::WindDirection(w) => self.wind_direction = w,
            I::WindSpeed(w) => self.wind_speed = w,
            I::FieldCondition(f) => self.field_condition = f,
            I::Precipitation(p) => self.precipitation = p,
            I::Sky(s) => self.sky = s,
            I::TimeOfGame(t) => self.game_length = t,
            I::Attendance(a) => self.attendance = a,
            I::WinningPitcher(p) => self.winning_pitcher = p,
            I::LosingPitcher(p) => self.losing_pitcher = p,
            I::SavePitcher(p) => self.save_pitcher = p,
            I::Unrecognized => {}
        }
    }
}
