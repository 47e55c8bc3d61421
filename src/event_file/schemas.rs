//! Output records, one type per persisted table. Serialized names follow the
//! table columns, misspellings included.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event_file::info::GameInfo;
use crate::event_file::outcome::PlayOutcome;
use crate::event_file::play::PlayRecord;
use crate::event_file::traits::{Batter, Inning, Matchup, Park, Pitcher, Player, Team, Umpire};

/// Placeholder for outs recorded during a plate appearance, which are not computed.
pub const TOTAL_OUTS_NOT_COMPUTED: i8 = -1;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum GameResult {
    HomeWin,
    AwayWin,
    Tie,
}

impl GameResult {
    pub fn from_runs(runs: Matchup<u32>) -> Self {
        match runs.home.cmp(&runs.away) {
            std::cmp::Ordering::Greater => Self::HomeWin,
            std::cmp::Ordering::Less => Self::AwayWin,
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct Game {
    #[serde(rename = "gameID")]
    pub game_id: String,
    pub away_team: Option<Team>,
    pub home_team: Team,
    pub home_win: bool,
    pub away_win: bool,
    pub tie: bool,
    pub home_runs: u32,
    pub away_runs: u32,
    pub date: Option<NaiveDate>,
    pub site: Option<Park>,
    pub start_time: Option<String>,
    pub day: Option<bool>,
    pub use_dh: Option<bool>,
    #[serde(rename = "upmire_home")]
    pub umpire_home: Option<Umpire>,
    #[serde(rename = "upmire_first")]
    pub umpire_first: Option<Umpire>,
    #[serde(rename = "upmire_second")]
    pub umpire_second: Option<Umpire>,
    #[serde(rename = "upmire_third")]
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

impl Game {
    pub fn new(
        game_id: String,
        home_team: Team,
        info: GameInfo,
        runs: Matchup<u32>,
    ) -> Self {
        let result = GameResult::from_runs(runs);
        Self {
            game_id,
            away_team: info.away_team,
            home_team,
            home_win: result == GameResult::HomeWin,
            away_win: result == GameResult::AwayWin,
            tie: result == GameResult::Tie,
            home_runs: runs.home,
            away_runs: runs.away,
            date: info.date,
            site: info.site,
            start_time: info.start_time,
            day: info.day,
            use_dh: info.use_dh,
            umpire_home: info.umpire_home,
            umpire_first: info.umpire_first,
            umpire_second: info.umpire_second,
            umpire_third: info.umpire_third,
            total_pitches: info.total_pitches,
            temperature: info.temperature,
            wind_direction: info.wind_direction,
            wind_speed: info.wind_speed,
            field_condition: info.field_condition,
            precipitation: info.precipitation,
            sky: info.sky,
            game_length: info.game_length,
            attendance: info.attendance,
            winning_pitcher: info.winning_pitcher,
            losing_pitcher: info.losing_pitcher,
            save_pitcher: info.save_pitcher,
        }
    }

    pub const fn result(&self) -> GameResult {
        if self.home_win {
            GameResult::HomeWin
        } else if self.away_win {
            GameResult::AwayWin
        } else {
            GameResult::Tie
        }
    }
}

/// Game-level values every plate appearance repeats.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct GameKey<'a> {
    pub game_id: &'a str,
    pub home_team: &'a str,
    pub away_team: Option<&'a str>,
    pub date: NaiveDate,
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct PlateAppearance {
    #[serde(rename = "PAID")]
    pub pa_id: String,
    #[serde(rename = "gameID")]
    pub game_id: String,
    #[serde(rename = "batterID")]
    pub batter_id: Batter,
    #[serde(rename = "pitcherID")]
    pub pitcher_id: Option<Pitcher>,
    pub away_team: Option<Team>,
    pub home_team: Team,
    pub date: NaiveDate,
    pub inning: Inning,
    pub home: bool,
    pub at_bat: bool,
    pub pitch_sequence: String,
    pub num_pitches: u32,
    pub single: bool,
    pub double: bool,
    pub triple: bool,
    pub home_run: bool,
    pub ground_rule_double: bool,
    pub strike_out: bool,
    pub walk: bool,
    pub intentional_walk: bool,
    pub fielders_choice: bool,
    pub reached_on_error: bool,
    pub hit_by_pitch: bool,
    pub double_play: bool,
    pub steals: u32,
    pub runs: u32,
    #[serde(rename = "RBI")]
    pub rbi: i32,
    pub hit: bool,
    pub on_base: bool,
    pub in_play: bool,
    pub total_outs: i8,
    pub final_count: String,
    pub double_plays: u32,
    pub unearned_runs: u32,
}

impl PlateAppearance {
    pub fn new(
        pa_id: String,
        game: &GameKey,
        play: PlayRecord,
        pitcher_id: Option<Pitcher>,
        num_pitches: u32,
    ) -> Self {
        let o = PlayOutcome::from(&play.decoded);
        Self {
            pa_id,
            game_id: game.game_id.to_string(),
            batter_id: play.batter,
            pitcher_id,
            away_team: game.away_team.map(String::from),
            home_team: game.home_team.to_string(),
            date: game.date,
            inning: play.inning,
            home: play.batting_side.is_home(),
            at_bat: o.at_bat,
            pitch_sequence: play.pitch_sequence,
            num_pitches,
            single: o.single,
            double: o.double,
            triple: o.triple,
            home_run: o.home_run,
            ground_rule_double: o.ground_rule_double,
            strike_out: o.strike_out,
            walk: o.walk,
            intentional_walk: o.intentional_walk,
            fielders_choice: o.fielders_choice,
            reached_on_error: o.reached_on_error,
            hit_by_pitch: o.hit_by_pitch,
            double_play: o.double_play,
            steals: o.steals,
            runs: o.runs,
            rbi: o.rbi,
            hit: o.hit,
            on_base: o.on_base,
            in_play: o.in_play,
            total_outs: TOTAL_OUTS_NOT_COMPUTED,
            final_count: play.final_count,
            double_plays: o.double_plays,
            unearned_runs: o.unearned_runs,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct PlayerRecord {
    #[serde(rename = "playerID")]
    pub player_id: Player,
    pub name: String,
}
