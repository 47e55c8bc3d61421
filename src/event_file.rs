use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::event_file::game_state::GameContext;
use crate::event_file::parser::RetrosheetReader;
use crate::event_file::schemas::{Game, PlateAppearance};
use crate::event_file::traits::Player;

pub mod error;
pub mod game_state;
pub mod info;
pub mod misc;
pub mod outcome;
pub mod parser;
pub mod pitch_sequence;
pub mod play;
pub mod roster;
pub mod schemas;
pub mod traits;

lazy_static! {
    static ref TEAM_FILE_REGEX: Regex = Regex::new(r"TEAM[0-9]{4}").unwrap();
}

const ROSTER_FILE_SUFFIX: &str = "ros";

/// Games and plate appearances keyed by their ids, plus every player
/// named on a `start`/`sub` line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedEventFile {
    pub games: BTreeMap<String, Game>,
    pub plate_appearances: BTreeMap<String, PlateAppearance>,
    pub players: BTreeMap<Player, String>,
}

impl ParsedEventFile {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.plate_appearances.is_empty()
    }

    pub fn extend(&mut self, other: Self) {
        self.games.extend(other.games);
        self.plate_appearances.extend(other.plate_appearances);
        self.players.extend(other.players);
    }
}

/// Team lists (`TEAM2010`) and rosters (`ANA2010.ROS`) share the event
/// file directories but hold no games.
pub fn is_event_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !(TEAM_FILE_REGEX.is_match(&path_str)
        || path_str.to_lowercase().ends_with(ROSTER_FILE_SUFFIX))
}

pub fn parse_event_file(path: &Path) -> Result<ParsedEventFile> {
    if !is_event_file(path) {
        debug!("Skipping non-event file {}", path.display());
        return Ok(ParsedEventFile::default());
    }
    debug!("Processing file {}", path.display());
    let reader = RetrosheetReader::new(path)?;
    parse_games(reader).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_games<R: Read>(reader: RetrosheetReader<R>) -> Result<ParsedEventFile> {
    let mut parsed = ParsedEventFile::default();
    for group in reader {
        let group = group?;
        if group.is_empty() {
            debug!("Game group {} has no records, skipping", group.game_num);
            continue;
        }
        let completed = GameContext::new(&group.records)
            .with_context(|| format!("Failed to parse game {}", group.game_num))?;
        for pa in completed.plate_appearances {
            parsed.plate_appearances.insert(pa.pa_id.clone(), pa);
        }
        for player in completed.players {
            parsed.players.insert(player.player_id, player.name);
        }
        parsed
            .games
            .insert(completed.game.game_id.clone(), completed.game);
    }
    debug!(
        "Parsed {} games, {} plate appearances",
        parsed.games.len(),
        parsed.plate_appearances.len()
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> Result<ParsedEventFile> {
        parse_games(RetrosheetReader::from_reader(input.as_bytes()))
    }

    #[test]
    fn roster_and_team_files_are_not_event_files() {
        assert!(!is_event_file(Path::new("data/2010eve/TEAM2010")));
        assert!(!is_event_file(Path::new("data/2010eve/ANA2010.ROS")));
        assert!(!is_event_file(Path::new("data/2010eve/ana2010.ros")));
        assert!(is_event_file(Path::new("data/2010eve/2010ANA.EVA")));
        assert!(is_event_file(Path::new("data/2010eve/2010NYN.EVN")));
    }

    #[test]
    fn skipped_files_are_never_opened() {
        let parsed = parse_event_file(Path::new("/nonexistent/TEAM2010")).unwrap();
        assert!(parsed.is_empty());
        let parsed = parse_event_file(Path::new("/nonexistent/ANA2010.ROS")).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn missing_event_file_is_an_error() {
        assert!(parse_event_file(Path::new("/nonexistent/2010ANA.EVA")).is_err());
    }

    #[test]
    fn empty_input_has_no_games() {
        assert!(parse_str("").unwrap().is_empty());
    }

    #[test]
    fn games_keyed_by_id() {
        let input = "id,ANA201004050\ninfo,hometeam,ANA\ninfo,date,2010/04/05\n\
                     play,1,0,spand001,00,,HR\n\
                     id,ANA201004060\ninfo,hometeam,ANA\ninfo,date,2010/04/06\n\
                     play,1,0,spand001,00,,K\n";
        let parsed = parse_str(input).unwrap();
        assert_eq!(
            parsed.games.keys().collect::<Vec<_>>(),
            vec!["ANA201004050", "ANA201004060"]
        );
        // The per-batter counter restarts with each game
        assert!(parsed.plate_appearances.contains_key("ANA201004050_spand001_1"));
        assert!(parsed.plate_appearances.contains_key("ANA201004060_spand001_1"));
        assert!(parsed.games["ANA201004050"].away_win);
        assert!(parsed.games["ANA201004060"].tie);
    }
}
