use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::event_file::traits::RetrosheetEventRecord;

pub type RecordVec = Vec<RetrosheetEventRecord>;
pub type RecordSlice = [RetrosheetEventRecord];

const GAME_ID_TOKEN: &str = "id";

/// The raw records of a single game, in file order. The first record is the
/// `id` line except for any lines preceding the first `id` in the file.
#[derive(Debug, Default, Clone)]
pub struct GameRecords {
    pub game_num: usize,
    pub records: RecordVec,
}

impl GameRecords {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Splits an event file into one group of records per game, reading lazily:
/// group N+1 is not read until group N has been handed off.
pub struct RetrosheetReader<R: Read = BufReader<File>> {
    reader: Reader<R>,
    current_record: StringRecord,
    // The `id` record that closed the previous group and opens the next one
    pending: Option<RetrosheetEventRecord>,
    seen_game_id: bool,
    game_num: usize,
    is_done: bool,
}

impl RetrosheetReader<BufReader<File>> {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> RetrosheetReader<R> {
    pub fn from_reader(rdr: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr);
        Self {
            reader,
            current_record: StringRecord::new(),
            pending: None,
            seen_game_id: false,
            game_num: 0,
            is_done: false,
        }
    }

    fn is_game_id(record: &StringRecord) -> bool {
        record.get(0) == Some(GAME_ID_TOKEN)
    }

    fn next_game(&mut self) -> Result<GameRecords> {
        let mut records: RecordVec = self.pending.take().into_iter().collect();
        loop {
            if !self.reader.read_record(&mut self.current_record)? {
                // The final group is flushed unconditionally, even if empty
                self.is_done = true;
                break;
            }
            if Self::is_game_id(&self.current_record) {
                if self.seen_game_id {
                    self.pending = Some(self.current_record.clone());
                    break;
                }
                self.seen_game_id = true;
            }
            records.push(self.current_record.clone());
        }
        let game_num = self.game_num;
        self.game_num += 1;
        Ok(GameRecords { game_num, records })
    }
}

impl<R: Read> Iterator for RetrosheetReader<R> {
    type Item = Result<GameRecords>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done {
            return None;
        }
        let game = self.next_game();
        if game.is_err() {
            self.is_done = true;
        }
        Some(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_fields(game: &GameRecords) -> Vec<String> {
        game.records
            .iter()
            .map(|r| format!("{},{}", &r[0], r.get(1).unwrap_or_default()))
            .collect()
    }

    fn groups(input: &str) -> Vec<GameRecords> {
        RetrosheetReader::from_reader(input.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn splits_on_id_lines() {
        let input = "id,ANA201004050\ninfo,hometeam,ANA\nplay,1,0,a,00,,K\n\
                     id,ANA201004060\ninfo,hometeam,ANA\n";
        let games = groups(input);
        assert_eq!(games.len(), 2);
        assert_eq!(
            first_fields(&games[0]),
            vec!["id,ANA201004050", "info,hometeam", "play,1"]
        );
        assert_eq!(first_fields(&games[1]), vec!["id,ANA201004060", "info,hometeam"]);
        assert_eq!(games[1].game_num, 1);
    }

    #[test]
    fn lines_before_first_id_join_first_group() {
        let games = groups("version,2\nid,ANA201004050\ninfo,hometeam,ANA\n");
        assert_eq!(games.len(), 1);
        assert_eq!(
            first_fields(&games[0]),
            vec!["version,2", "id,ANA201004050", "info,hometeam"]
        );
    }

    #[test]
    fn file_without_id_is_one_group() {
        let games = groups("");
        assert_eq!(games.len(), 1);
        assert!(games[0].is_empty());

        let games = groups("info,hometeam,ANA\n");
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].records.len(), 1);
    }

    #[test]
    fn trailing_id_yields_group_without_plays() {
        let games = groups("id,ANA201004050\nplay,1,0,a,00,,K\nid,ANA201004060\n");
        assert_eq!(games.len(), 2);
        assert_eq!(first_fields(&games[1]), vec!["id,ANA201004060"]);
    }

    #[test]
    fn quoted_names_are_unquoted() {
        let games = groups("id,ANA201004050\nstart,abreb001,\"Bobby Abreu\",0,1,9\n");
        assert_eq!(&games[0].records[1][2], "Bobby Abreu");
    }
}
