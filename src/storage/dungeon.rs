//! Reference corpus entries and their row representation

use crate::codec::{Layout, Treasure};
use crate::io::error::{DungeonError, Result, WithRecord};

/// One dungeon of the reference corpus, identified by its generation seed
#[derive(Clone, Debug, PartialEq)]
pub struct Dungeon {
    /// Generation seed, unique across the corpus
    pub seed: u32,
    /// Full minimap layout
    pub layout: Layout,
    /// Chests in in-game order, possibly empty
    pub treasure: Treasure,
}

/// Encoded form of a [`Dungeon`] as stored in the `dungeons` table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonRow {
    /// Seed column
    pub seed: i64,
    /// 450-character layout column
    pub layout: String,
    /// Concatenated chest records, empty when the dungeon has no chests
    pub treasure: String,
}

impl Dungeon {
    /// Create a corpus entry
    pub const fn new(seed: u32, layout: Layout, treasure: Treasure) -> Self {
        Self {
            seed,
            layout,
            treasure,
        }
    }

    /// Encode the entry for storage
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileData`] if the layout contains a tile that
    /// cannot be encoded.
    pub fn to_row(&self) -> Result<DungeonRow> {
        Ok(DungeonRow {
            seed: i64::from(self.seed),
            layout: self.layout.encode()?,
            treasure: self.treasure.encode(),
        })
    }

    /// Decode a stored row
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::CorruptRecord`] if the seed is out of range or either
    /// column fails to decode.
    pub fn from_row(row: &DungeonRow) -> Result<Self> {
        let seed = u32::try_from(row.seed).map_err(|e| DungeonError::CorruptRecord {
            seed: row.seed,
            reason: e.to_string(),
        })?;

        Ok(Self {
            seed,
            layout: Layout::decode(&row.layout).for_record(row.seed)?,
            treasure: Treasure::decode(&row.treasure).for_record(row.seed)?,
        })
    }
}
