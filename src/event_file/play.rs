use anyhow::{Context, Result};
use itertools::Itertools;

use crate::event_file::error::ParseError;
use crate::event_file::traits::{
    line_number, raw_line, Batter, FromRetrosheetRecord, Inning, RetrosheetEventRecord, Side,
};

const MODIFIER_DIVIDER: char = '/';
const ADVANCE_BOUNDARY: char = '.';
const ADVANCE_DIVIDER: char = ';';

/// An event string split into its three syntactic parts, with no
/// interpretation of what they mean.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct DecodedEvent {
    pub basic_play: String,
    pub modifiers: Vec<String>,
    pub advances: Vec<String>,
}

impl DecodedEvent {
    fn split_nonempty(value: &str, divider: char) -> Vec<String> {
        value
            .split(divider)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Basic play, modifiers and advances joined back together for substring
    /// counting. Each modifier is followed by a `/`, and each advance
    /// contributes only its `;` separator, not its text.
    pub fn counting_string(&self) -> String {
        let modifiers = self
            .modifiers
            .iter()
            .map(|m| format!("{m}{MODIFIER_DIVIDER}"))
            .join("");
        let advances = ADVANCE_DIVIDER.to_string().repeat(self.advances.len());
        format!("{}{MODIFIER_DIVIDER}{modifiers}{advances}", self.basic_play)
    }
}

impl From<&str> for DecodedEvent {
    fn from(value: &str) -> Self {
        let slash = value.find(MODIFIER_DIVIDER);
        let period = value.find(ADVANCE_BOUNDARY);

        match (slash, period) {
            (Some(s), Some(p)) => Self {
                basic_play: value[..s].to_string(),
                // A period ahead of the first slash leaves no modifier span
                modifiers: Self::split_nonempty(value.get(s..p).unwrap_or_default(), MODIFIER_DIVIDER),
                advances: Self::split_nonempty(&value[p + 1..], ADVANCE_DIVIDER),
            },
            (Some(s), None) => Self {
                basic_play: value[..s].to_string(),
                modifiers: Self::split_nonempty(&value[s..], MODIFIER_DIVIDER),
                advances: Vec::new(),
            },
            (None, Some(p)) => Self {
                basic_play: value[..p].to_string(),
                modifiers: Vec::new(),
                advances: Self::split_nonempty(&value[p + 1..], ADVANCE_DIVIDER),
            },
            (None, None) => Self {
                basic_play: value.to_string(),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct PlayRecord {
    pub inning: Inning,
    pub batting_side: Side,
    pub batter: Batter,
    pub final_count: String,
    pub pitch_sequence: String,
    pub event: String,
    pub decoded: DecodedEvent,
}

impl PlayRecord {
    const FIELD_NAMES: [&'static str; 7] = [
        "record_type",
        "inning",
        "home",
        "batterID",
        "final_count",
        "pitch_sequence",
        "event",
    ];
}

impl FromRetrosheetRecord for PlayRecord {
    fn new(record: &RetrosheetEventRecord) -> Result<Self> {
        if let Some(&field) = Self::FIELD_NAMES.get(record.len()) {
            return Err(ParseError::missing(field, line_number(record), raw_line(record)).into());
        }
        // Any commas inside the event description are dropped
        let event = record.iter().skip(6).join("");
        let decoded = DecodedEvent::from(event.as_str());
        Ok(Self {
            inning: record[1]
                .parse::<Inning>()
                .with_context(|| Self::error("Invalid inning", record))?,
            batting_side: if &record[2] == "1" { Side::Home } else { Side::Away },
            batter: record[3].to_string(),
            final_count: record[4].to_string(),
            pitch_sequence: record[5].to_string(),
            event,
            decoded,
        })
    }
}
