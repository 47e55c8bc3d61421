use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::debug;

use crate::event_file::error::ParseError;
use crate::event_file::info::{GameInfo, InfoRecord};
use crate::event_file::misc::GameId;
use crate::event_file::parser::RecordSlice;
use crate::event_file::pitch_sequence::count_pitches;
use crate::event_file::play::PlayRecord;
use crate::event_file::roster::RosterTracker;
use crate::event_file::schemas::{Game, GameKey, PlateAppearance, PlayerRecord};
use crate::event_file::traits::{
    line_number, raw_line, Batter, FromRetrosheetRecord, Matchup, RetrosheetEventRecord,
};

/// A game after its last record has been consumed. Nothing about it changes
/// from here on.
#[derive(Debug, Clone)]
pub struct CompletedGame {
    pub game: Game,
    pub plate_appearances: Vec<PlateAppearance>,
    pub players: Vec<PlayerRecord>,
}

/// Everything that accumulates while one game's records are read: metadata,
/// the current lineups, per-batter PA counters and the running score.
/// Scoped to a single game so nothing leaks into the next one.
pub struct GameContext {
    game_id: GameId,
    first_line: Option<u64>,
    first_raw: String,
    info: GameInfo,
    roster: RosterTracker,
    pa_counter: HashMap<Batter, u32>,
    runs: Matchup<u32>,
    plate_appearances: Vec<PlateAppearance>,
    players: Vec<PlayerRecord>,
}

impl GameContext {
    /// Runs a full group of records through a fresh context.
    pub fn new(records: &RecordSlice) -> Result<CompletedGame> {
        let first = records.first().ok_or(ParseError::EmptyGroup)?;
        let mut context = Self::open(first)?;
        for record in records {
            context.process(record).with_context(|| {
                format!(
                    "Failed to process line {}: {}",
                    line_number(record).unwrap_or_default(),
                    raw_line(record)
                )
            })?;
        }
        context.finalize()
    }

    pub fn open(first_record: &RetrosheetEventRecord) -> Result<Self> {
        Ok(Self {
            game_id: GameId::new(first_record)?,
            first_line: line_number(first_record),
            first_raw: raw_line(first_record),
            info: GameInfo::default(),
            roster: RosterTracker::default(),
            pa_counter: HashMap::new(),
            runs: Matchup::default(),
            plate_appearances: Vec::new(),
            players: Vec::new(),
        })
    }

    pub fn process(&mut self, record: &RetrosheetEventRecord) -> Result<()> {
        match record.get(0) {
            Some("info") => self.info.update(InfoRecord::new(record)?),
            Some("start" | "sub") => {
                if let Some(appearance) = self.roster.update(record)? {
                    self.players.push(PlayerRecord {
                        player_id: appearance.player,
                        name: appearance.player_name,
                    });
                }
            }
            Some("play") => self.add_plate_appearance(record)?,
            _ => {}
        }
        Ok(())
    }

    fn add_plate_appearance(&mut self, record: &RetrosheetEventRecord) -> Result<()> {
        let play = PlayRecord::new(record)?;
        let missing = |field| ParseError::missing(field, line_number(record), raw_line(record));
        let home_team = self
            .info
            .home_team
            .as_deref()
            .ok_or_else(|| missing("home_team"))?;
        let date = self.info.date.ok_or_else(|| missing("date"))?;
        let game_id = self.game_id.with_home_team(home_team);

        let counter = self.pa_counter.entry(play.batter.clone()).or_insert(0);
        *counter += 1;
        let pa_id = format!("{}_{}_{}", game_id, play.batter, counter);

        let batting_side = play.batting_side;
        let pitcher = self.roster.pitcher(batting_side.flip()).cloned();
        let num_pitches = count_pitches(&play.pitch_sequence, &play.final_count);
        let key = GameKey {
            game_id: &game_id,
            home_team,
            away_team: self.info.away_team.as_deref(),
            date,
        };
        let plate_appearance = PlateAppearance::new(pa_id, &key, play, pitcher, num_pitches);

        *self.runs.get_mut(batting_side) += plate_appearance.runs;
        self.plate_appearances.push(plate_appearance);
        Ok(())
    }

    pub fn finalize(self) -> Result<CompletedGame> {
        let home_team = self.info.home_team.clone().ok_or_else(|| {
            ParseError::missing("home_team", self.first_line, self.first_raw.clone())
        })?;
        let game_id = self.game_id.with_home_team(&home_team);
        let game = Game::new(game_id, home_team, self.info, self.runs);
        debug!(
            "Finalized game {} ({} plate appearances)",
            game.game_id,
            self.plate_appearances.len()
        );
        Ok(CompletedGame {
            game,
            plate_appearances: self.plate_appearances,
            players: self.players,
        })
    }
}
