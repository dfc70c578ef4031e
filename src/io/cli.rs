//! Command-line interface for building the corpus and identifying dungeons

use crate::codec::{Layout, Tile};
use crate::io::configuration::{
    ACCEPTANCE_THRESHOLD, DEFAULT_DATABASE_PATH, DEFAULT_TILE_SHEET_PATH,
};
use crate::io::error::{DungeonError, Result, invalid_parameter};
use crate::io::logging::level_for;
use crate::io::progress::ImportProgress;
use crate::matching::pattern::Observation;
use crate::matching::resolver::{Resolution, resolve};
use crate::storage::import::{Corpus, ImportSummary, read_corpus, store_corpus};
use crate::storage::store::LayoutStore;
use crate::vision::classifier::{TileClassifier, TileHashCache};
use crate::vision::pipeline::recognize_layout;
use crate::vision::render::export_layout_png;
use crate::vision::sheet::TileSheet;
use clap::{ArgAction, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "darkdream")]
#[command(
    author,
    version,
    about = "Identify dungeon layouts from partial minimap observations"
)]
/// Command-line arguments for the identification tool
pub struct Cli {
    /// Layout database
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// Increase log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and hide progress
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create the database schema if it does not exist
    Init,

    /// Build the database from a JSON corpus
    Import {
        /// Corpus file keyed by hex seed
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,
    },

    /// Look up a partially known layout
    Match {
        /// 450 hex characters, FF for unknown cells
        #[arg(value_name = "LAYOUT")]
        layout: String,

        /// Treat the layout as recognized from an image, tolerating confusable tiles
        #[arg(long)]
        noisy: bool,
    },

    /// Recognize a minimap image and look up its layout
    Identify {
        /// Minimap image cropped to the 15x15 grid
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Reference tile artwork
        #[arg(long, value_name = "PATH", default_value = DEFAULT_TILE_SHEET_PATH)]
        tile_sheet: PathBuf,

        /// Minimum hash similarity for a tile to be recognized
        #[arg(long, default_value_t = ACCEPTANCE_THRESHOLD)]
        threshold: f64,
    },

    /// Draw a stored layout as a minimap image
    Render {
        /// Dungeon seed, decimal or 0x-prefixed hex
        #[arg(value_name = "SEED", value_parser = parse_seed)]
        seed: u32,

        /// Output image path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Reference tile artwork
        #[arg(long, value_name = "PATH", default_value = DEFAULT_TILE_SHEET_PATH)]
        tile_sheet: PathBuf,
    },

    /// List the distinct tiles used by the stored corpus
    Tiles,
}

impl Cli {
    /// Log level selected by `-v` and `--quiet`
    pub const fn log_level(&self) -> Level {
        level_for(self.verbose, self.quiet)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a seed given as decimal or `0x`-prefixed hex
///
/// # Errors
///
/// Returns a message if the text is not a 32-bit unsigned number.
pub fn parse_seed(text: &str) -> std::result::Result<u32, String> {
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid seed {text:?}: {e}"))
}

/// Result of a command, printed by [`CommandProcessor::process`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Schema is in place
    Initialized {
        /// Rows already stored
        stored: u64,
    },
    /// Corpus import finished
    Imported(ImportSummary),
    /// Lookup of an observed layout
    Matched {
        /// Compatible stored layouts
        count: usize,
        /// Encoded layout when exactly one matched
        layout: Option<String>,
        /// Cells recognized from the image, for `identify`
        recognized: Option<usize>,
    },
    /// Layout image written
    Rendered {
        /// Seed that was drawn
        seed: u32,
        /// Where the image went
        output: PathBuf,
    },
    /// Distinct stored tiles in order
    Tiles(Vec<Tile>),
}

impl Outcome {
    fn matched(resolution: &Resolution, recognized: Option<usize>) -> Result<Self> {
        let layout = resolution.layout().map(Layout::encode).transpose()?;
        Ok(Self::Matched {
            count: resolution.match_count(),
            layout,
            recognized,
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized { stored } => write!(f, "database ready ({stored} layouts)"),
            Self::Imported(summary) => write!(
                f,
                "imported {} layouts, skipped {}, {} stored",
                summary.imported, summary.skipped, summary.stored
            ),
            Self::Matched {
                count,
                layout,
                recognized,
            } => {
                if let Some(recognized) = recognized {
                    writeln!(f, "recognized {recognized} cells")?;
                }
                match (count, layout) {
                    (0, _) => write!(f, "no matching layout"),
                    (_, Some(layout)) => write!(f, "1 matching layout\n{layout}"),
                    (count, None) => write!(f, "{count} matching layouts"),
                }
            }
            Self::Rendered { seed, output } => {
                write!(f, "rendered {seed:08X} to {}", output.display())
            }
            Self::Tiles(tiles) => {
                let lines: Vec<String> = tiles
                    .iter()
                    .map(|tile| match tile.encode() {
                        Ok(encoded) => format!("{encoded}  {tile}"),
                        Err(_invalid) => format!("??  {tile}"),
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}

/// Runs the command selected on the command line
pub struct CommandProcessor {
    cli: Cli,
}

impl CommandProcessor {
    /// Create a processor for the parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command and print its outcome
    ///
    /// # Errors
    ///
    /// Returns any error from the command.
    // Allow print for the command result, which is the program output
    #[allow(clippy::print_stdout)]
    pub fn process(&self) -> Result<()> {
        let outcome = self.execute()?;
        println!("{outcome}");
        Ok(())
    }

    /// Run the command and return its outcome
    ///
    /// # Errors
    ///
    /// Returns an error if the database, corpus, images or arguments are invalid.
    pub fn execute(&self) -> Result<Outcome> {
        match &self.cli.command {
            Command::Init => {
                let store = self.open_store()?;
                store.create()?;
                Ok(Outcome::Initialized {
                    stored: store.count()?,
                })
            }
            Command::Import { corpus } => {
                let records = read_corpus(corpus)?;
                info!(
                    records = records.len(),
                    skipped = records.skipped,
                    path = %corpus.display(),
                    "read corpus"
                );

                let mut store = self.open_store()?;
                let progress = self.import_progress(&records);
                let summary = store_corpus(&mut store, &records, Some(&progress))?;
                progress.finish("Imported");
                Ok(Outcome::Imported(summary))
            }
            Command::Match { layout, noisy } => {
                let store = self.open_store()?;
                let observed = Layout::decode(layout)?;
                let observation = if *noisy {
                    Observation::Recognition
                } else {
                    Observation::Selection
                };
                let resolution = resolve(&store, &observed, observation)?;
                Outcome::matched(&resolution, None)
            }
            Command::Identify {
                image,
                tile_sheet,
                threshold,
            } => {
                let sheet = TileSheet::open(tile_sheet)?;
                let classifier =
                    TileClassifier::with_threshold(TileHashCache::from_sheet(&sheet)?, *threshold)?;
                let capture = image::open(image)
                    .map_err(|e| DungeonError::ImageLoad {
                        path: image.clone(),
                        source: e,
                    })?
                    .to_rgb8();

                let scored = recognize_layout(&classifier, &capture);
                info!(
                    recognized = scored.recognized_count(),
                    mean_score = scored.mean_score(),
                    "classified capture"
                );

                let store = self.open_store()?;
                let resolution = resolve(&store, &scored.layout(), Observation::Recognition)?;
                Outcome::matched(&resolution, Some(scored.recognized_count()))
            }
            Command::Render {
                seed,
                output,
                tile_sheet,
            } => {
                let store = self.open_store()?;
                let dungeon = store
                    .get(*seed)?
                    .ok_or_else(|| invalid_parameter("seed", seed, &"not in the database"))?;
                let sheet = TileSheet::open(tile_sheet)?;
                export_layout_png(&sheet, &dungeon.layout, output)?;
                Ok(Outcome::Rendered {
                    seed: *seed,
                    output: output.clone(),
                })
            }
            Command::Tiles => {
                let store = self.open_store()?;
                Ok(Outcome::Tiles(store.unique_tiles()?.into_iter().collect()))
            }
        }
    }

    /// Progress bar sized to the records about to be written
    pub fn import_progress(&self, corpus: &Corpus) -> ImportProgress {
        if self.cli.should_show_progress() {
            ImportProgress::new(corpus.len())
        } else {
            ImportProgress::hidden(corpus.len())
        }
    }

    fn open_store(&self) -> Result<LayoutStore> {
        LayoutStore::open(&self.cli.database)
    }
}
