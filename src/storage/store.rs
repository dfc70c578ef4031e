//! SQLite-backed store of the reference dungeon corpus
//!
//! Rows are written once by the offline corpus builder and only read afterwards.
//! Lookups scan the `layout` column and evaluate the compiled pattern per row; at
//! ~21k rows a full scan is fast enough that no index beyond the primary key is kept.

use crate::codec::{Layout, Tile, Treasure};
use crate::io::error::{Result, WithRecord, read_error, write_error};
use crate::matching::pattern::ConstraintPattern;
use crate::storage::dungeon::{Dungeon, DungeonRow};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS dungeons (
    seed INTEGER PRIMARY KEY,
    layout TEXT NOT NULL,
    treasure TEXT NOT NULL DEFAULT ''
)";

// Stores built before treasure was collected only have (seed, layout)
const ADD_TREASURE_COLUMN: &str =
    "ALTER TABLE dungeons ADD COLUMN treasure TEXT NOT NULL DEFAULT ''";

const UPSERT: &str = "INSERT OR REPLACE INTO dungeons (seed, layout, treasure) VALUES (?1, ?2, ?3)";

/// Persistent corpus of dungeon layouts keyed by seed
pub struct LayoutStore {
    connection: Connection,
}

impl LayoutStore {
    /// Open (or create) the database file at `path`
    ///
    /// The schema is not touched; call [`LayoutStore::create`] before first use.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path.as_ref()).map_err(|e| read_error("open database", e))?;
        debug!(path = %path.as_ref().display(), "opened layout store");
        Ok(Self { connection })
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().map_err(|e| read_error("open in-memory database", e))?;
        Ok(Self { connection })
    }

    /// Ensure the `dungeons` table exists with all columns
    ///
    /// Safe to call on an already initialized store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageWrite`] if the schema cannot be created.
    pub fn create(&self) -> Result<()> {
        self.connection
            .execute(CREATE_TABLE, [])
            .map_err(|e| write_error("create table", e))?;

        if !self.has_column("treasure")? {
            self.connection
                .execute(ADD_TREASURE_COLUMN, [])
                .map_err(|e| write_error("add treasure column", e))?;
            info!("added treasure column to existing layout store");
        }

        Ok(())
    }

    fn has_column(&self, name: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('dungeons') WHERE name = ?1",
                [name],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .map_err(|e| read_error("inspect schema", e))
    }

    /// Insert or replace the row for `seed`
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::InvalidTileData`] if the layout cannot be encoded,
    /// or [`crate::DungeonError::StorageWrite`] if the row cannot be written.
    pub fn upsert(&self, seed: u32, layout: &Layout, treasure: &Treasure) -> Result<()> {
        self.connection
            .execute(
                UPSERT,
                params![i64::from(seed), layout.encode()?, treasure.encode()],
            )
            .map_err(|e| write_error("upsert dungeon", e))?;
        Ok(())
    }

    /// Insert or replace many entries in a single transaction
    ///
    /// `on_written` receives the running count after every row. Nothing is committed if
    /// any entry fails.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::InvalidTileData`] if an entry cannot be encoded,
    /// or [`crate::DungeonError::StorageWrite`] if the transaction fails.
    pub fn upsert_many<F>(&mut self, dungeons: &[Dungeon], mut on_written: F) -> Result<u64>
    where
        F: FnMut(u64),
    {
        let transaction = self
            .connection
            .transaction()
            .map_err(|e| write_error("begin transaction", e))?;

        let mut written = 0;
        {
            let mut statement = transaction
                .prepare_cached(UPSERT)
                .map_err(|e| write_error("prepare upsert", e))?;

            for dungeon in dungeons {
                let row = dungeon.to_row()?;
                statement
                    .execute(params![row.seed, row.layout, row.treasure])
                    .map_err(|e| write_error("upsert dungeon", e))?;
                written += 1;
                on_written(written);
            }
        }

        transaction
            .commit()
            .map_err(|e| write_error("commit transaction", e))?;
        info!(written, "upserted dungeons");
        Ok(written)
    }

    /// Layout strings of every entry matching `pattern`, in seed order
    ///
    /// Only the layout column is filtered; treasure never affects matching.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if the scan fails.
    pub fn find_matching(&self, pattern: &ConstraintPattern) -> Result<Vec<String>> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT layout FROM dungeons ORDER BY seed")
            .map_err(|e| read_error("prepare match query", e))?;
        let rows = statement
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| read_error("match layouts", e))?;

        let mut matches = Vec::new();
        for row in rows {
            let layout = row.map_err(|e| read_error("read layout", e))?;
            if pattern.is_match(&layout) {
                matches.push(layout);
            }
        }

        debug!(matches = matches.len(), %pattern, "matched layouts");
        Ok(matches)
    }

    /// Full entries matching `pattern`, in seed order
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if the scan fails, or
    /// [`crate::DungeonError::CorruptRecord`] if a matching row cannot be decoded.
    pub fn find_matching_dungeons(&self, pattern: &ConstraintPattern) -> Result<Vec<Dungeon>> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT seed, layout, treasure FROM dungeons ORDER BY seed")
            .map_err(|e| read_error("prepare match query", e))?;
        let rows = statement
            .query_map([], read_row)
            .map_err(|e| read_error("match dungeons", e))?;

        let mut matches = Vec::new();
        for row in rows {
            let row = row.map_err(|e| read_error("read dungeon", e))?;
            if pattern.is_match(&row.layout) {
                matches.push(Dungeon::from_row(&row)?);
            }
        }

        Ok(matches)
    }

    /// Entry stored for `seed`, if any
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if the lookup fails, or
    /// [`crate::DungeonError::CorruptRecord`] if the row cannot be decoded.
    pub fn get(&self, seed: u32) -> Result<Option<Dungeon>> {
        let row = self
            .connection
            .query_row(
                "SELECT seed, layout, treasure FROM dungeons WHERE seed = ?1",
                [i64::from(seed)],
                read_row,
            )
            .optional()
            .map_err(|e| read_error("get dungeon", e))?;

        row.as_ref().map(Dungeon::from_row).transpose()
    }

    /// Number of stored entries
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if the count fails.
    pub fn count(&self) -> Result<u64> {
        let count = self
            .connection
            .query_row("SELECT COUNT(*) FROM dungeons", [], |row| row.get::<_, i64>(0))
            .map_err(|e| read_error("count dungeons", e))?;
        Ok(count.unsigned_abs())
    }

    /// Every distinct tile appearing in any stored layout
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::StorageRead`] if the scan fails, or
    /// [`crate::DungeonError::CorruptRecord`] if a layout cannot be decoded.
    pub fn unique_tiles(&self) -> Result<BTreeSet<Tile>> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT seed, layout FROM dungeons ORDER BY seed")
            .map_err(|e| read_error("prepare tile scan", e))?;
        let rows = statement
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| read_error("scan tiles", e))?;

        let mut tiles = BTreeSet::new();
        for row in rows {
            let (seed, layout) = row.map_err(|e| read_error("read layout", e))?;
            tiles.extend(Layout::decode(&layout).for_record(seed)?.tiles());
        }

        Ok(tiles)
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DungeonRow> {
    Ok(DungeonRow {
        seed: row.get(0)?,
        layout: row.get(1)?,
        treasure: row.get(2)?,
    })
}
