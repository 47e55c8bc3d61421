#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::cargo)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glob::{glob, GlobError};
use rayon::prelude::*;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use retro_pa::event_file::schemas::PlayerRecord;
use retro_pa::{parse_event_file, ParsedEventFile};

const ABOUT: &str = "Converts Retrosheet event files into game and plate appearance tables.";

#[derive(Debug, Eq, PartialEq, Copy, Clone, Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
enum OutputTable {
    Games,
    PlateAppearances,
    Players,
}

#[derive(Parser, Debug)]
#[command(name = "retro-pa", about = ABOUT)]
struct Opt {
    /// Directory containing unpacked event files
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long)]
    output_dir: PathBuf,

    /// Glob applied inside the input directory. Roster and team files are
    /// skipped regardless.
    #[arg(short, long, default_value = "*")]
    pattern: String,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    #[arg(short, long)]
    verbose: bool,
}

struct TableWriter {
    output_root: PathBuf,
    format: OutputFormat,
}

impl TableWriter {
    fn new(output_dir: &Path, format: OutputFormat) -> Result<Self> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        Ok(Self {
            output_root: output_dir.canonicalize()?,
            format,
        })
    }

    fn path(&self, table: OutputTable) -> PathBuf {
        self.output_root.join(format!("{table}.{}", self.format))
    }

    fn write<'a, T: Serialize + 'a>(
        &self,
        table: OutputTable,
        rows: impl Iterator<Item = &'a T>,
    ) -> Result<usize> {
        let path = self.path(table);
        debug!("Creating file {}", path.display());
        let mut count = 0;
        match self.format {
            OutputFormat::Csv => {
                let mut csv = csv::Writer::from_path(&path)?;
                for row in rows {
                    csv.serialize(row)?;
                    count += 1;
                }
                csv.flush()?;
            }
            OutputFormat::Json => {
                let rows = rows.collect::<Vec<_>>();
                count = rows.len();
                let writer = BufWriter::new(File::create(&path)?);
                serde_json::to_writer_pretty(writer, &rows)?;
            }
        }
        Ok(count)
    }

    fn write_all(&self, parsed: &ParsedEventFile) -> Result<()> {
        let players = parsed
            .players
            .iter()
            .map(|(player_id, name)| PlayerRecord {
                player_id: player_id.clone(),
                name: name.clone(),
            })
            .collect::<Vec<_>>();
        for table in OutputTable::iter() {
            let count = match table {
                OutputTable::Games => self.write(table, parsed.games.values())?,
                OutputTable::PlateAppearances => {
                    self.write(table, parsed.plate_appearances.values())?
                }
                OutputTable::Players => self.write(table, players.iter())?,
            };
            info!("Wrote {} rows to {}", count, self.path(table).display());
        }
        Ok(())
    }
}

fn process_files(opt: &Opt) -> Result<ParsedEventFile> {
    let pattern = opt.input.join(&opt.pattern);
    let mut files =
        glob(&pattern.to_string_lossy())?.collect::<Result<Vec<PathBuf>, GlobError>>()?;
    files.par_sort();
    info!("Parsing {} files under {}", files.len(), opt.input.display());

    // Each file parses independently; failures are logged and the batch moves on
    let results = files
        .par_iter()
        .filter_map(|f| match parse_event_file(f) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                error!("{:?}", e);
                None
            }
        })
        .collect::<Vec<ParsedEventFile>>();

    let mut merged = ParsedEventFile::default();
    for parsed in results {
        merged.extend(parsed);
    }
    info!(
        "Parsed {} games, {} plate appearances",
        merged.games.len(),
        merged.plate_appearances.len()
    );
    Ok(merged)
}

#[allow(clippy::expect_used)]
fn main() {
    let opt: Opt = Opt::parse();
    let level = if opt.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let start = Instant::now();
    let writer =
        TableWriter::new(&opt.output_dir, opt.format).expect("Error occurred on output dir check");
    let parsed = process_files(&opt).expect("Error occurred while processing files");
    writer
        .write_all(&parsed)
        .expect("Error occurred while writing output");

    let end = start.elapsed();
    info!("Elapsed: {:?}", end);
}
