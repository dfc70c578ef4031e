//! Offline corpus builder
//!
//! Reads a JSON corpus keyed by eight-digit hex seed:
//!
//! ```json
//! { "0000002A": { "layout": "FF...", "treasure": "0001..." } }
//! ```
//!
//! Each record is validated through the codecs before anything is written. A malformed
//! record is skipped and logged; the remaining records are stored in one transaction.

use crate::codec::hex::parse_hex;
use crate::codec::{Layout, Treasure};
use crate::io::configuration::{EXPECTED_CORPUS_SIZE, IMPORT_PROGRESS_STEP, SEED_KEY_LEN};
use crate::io::error::{DungeonError, Result};
use crate::io::progress::ImportProgress;
use crate::storage::dungeon::Dungeon;
use crate::storage::store::LayoutStore;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct CorpusRecord {
    layout: String,
    #[serde(default)]
    treasure: String,
}

/// Validated corpus entries plus the number of records rejected
#[derive(Debug, Default)]
pub struct Corpus {
    /// Entries that decoded cleanly, in seed order
    pub dungeons: Vec<Dungeon>,
    /// Records that failed validation
    pub skipped: u64,
}

impl Corpus {
    /// Number of entries that will be written
    pub fn len(&self) -> u64 {
        self.dungeons.len() as u64
    }

    /// Whether no entry survived validation
    pub fn is_empty(&self) -> bool {
        self.dungeons.is_empty()
    }
}

/// Outcome of an import
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records written to the store
    pub imported: u64,
    /// Records rejected during validation
    pub skipped: u64,
    /// Entries in the store after the import
    pub stored: u64,
}

impl ImportSummary {
    /// Whether the store now holds exactly the reference corpus size
    pub const fn is_complete(&self) -> bool {
        self.stored == EXPECTED_CORPUS_SIZE
    }
}

/// Parse and validate a corpus document
///
/// # Errors
///
/// Returns the JSON error if the document is not an object of records.
pub fn parse_corpus(json: &str) -> serde_json::Result<Corpus> {
    let records: BTreeMap<String, CorpusRecord> = serde_json::from_str(json)?;

    let mut corpus = Corpus::default();
    for (key, record) in records {
        match validate_record(&key, &record) {
            Ok(dungeon) => corpus.dungeons.push(dungeon),
            Err(error) => {
                warn!(seed = %key, %error, "skipping malformed corpus record");
                corpus.skipped += 1;
            }
        }
    }

    corpus.dungeons.sort_by_key(|dungeon| dungeon.seed);
    Ok(corpus)
}

fn validate_record(key: &str, record: &CorpusRecord) -> Result<Dungeon> {
    // Fixed width, so each seed has exactly one spelling
    if key.len() != SEED_KEY_LEN {
        return Err(DungeonError::InvalidHexData {
            data: key.to_owned(),
        });
    }
    let seed = parse_hex(key.as_bytes())?;
    let layout = Layout::decode(&record.layout)?;
    let treasure = Treasure::decode(&record.treasure)?;
    Ok(Dungeon::new(seed, layout, treasure))
}

/// Read and validate a corpus file
///
/// # Errors
///
/// Returns [`DungeonError::FileSystem`] if the file cannot be read, or
/// [`DungeonError::CorpusFormat`] if it is not a corpus document.
pub fn read_corpus(path: &Path) -> Result<Corpus> {
    let json = std::fs::read_to_string(path).map_err(|e| DungeonError::FileSystem {
        path: path.to_path_buf(),
        operation: "read corpus",
        source: e,
    })?;

    parse_corpus(&json).map_err(|e| DungeonError::CorpusFormat {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a corpus file into the store
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if writing fails; in the
/// latter case nothing from this import is committed.
pub fn import_corpus(
    store: &mut LayoutStore,
    path: &Path,
    progress: Option<&ImportProgress>,
) -> Result<ImportSummary> {
    let corpus = read_corpus(path)?;
    info!(
        records = corpus.len(),
        skipped = corpus.skipped,
        path = %path.display(),
        "read corpus"
    );
    store_corpus(store, &corpus, progress)
}

/// Write an already validated corpus into the store
///
/// The schema is created if needed. `progress` is advanced as rows are written.
///
/// # Errors
///
/// Returns an error if writing fails; nothing from this import is committed then.
pub fn store_corpus(
    store: &mut LayoutStore,
    corpus: &Corpus,
    progress: Option<&ImportProgress>,
) -> Result<ImportSummary> {
    store.create()?;
    let imported = store.upsert_many(&corpus.dungeons, |written| {
        if let Some(progress) = progress {
            if written % IMPORT_PROGRESS_STEP == 0 {
                progress.set_written(written);
            }
        }
    })?;
    if let Some(progress) = progress {
        progress.set_written(imported);
    }

    let summary = ImportSummary {
        imported,
        skipped: corpus.skipped,
        stored: store.count()?,
    };
    if !summary.is_complete() {
        warn!(
            stored = summary.stored,
            expected = EXPECTED_CORPUS_SIZE,
            "corpus size differs from the reference corpus"
        );
    }

    Ok(summary)
}
