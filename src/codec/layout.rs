//! Fixed 15x15 tile layouts and their 450-character encoding

use crate::codec::hex::parse_hex_byte;
use crate::codec::tile::Tile;
use crate::io::configuration::{ENCODED_LAYOUT_LEN, ENCODED_TILE_LEN, GRID_CELLS, GRID_SIZE};
use crate::io::error::{DungeonError, Result};
use ndarray::Array2;
use std::str::FromStr;

/// A complete dungeon minimap, row-major, with unknown cells held as [`Tile::UNKNOWN`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    cells: Array2<Tile>,
}

impl Layout {
    /// Layout with every cell unknown
    pub fn unknown() -> Self {
        Self {
            cells: Array2::from_elem((GRID_SIZE, GRID_SIZE), Tile::UNKNOWN),
        }
    }

    /// Build a layout by evaluating `f(row, col)` for every cell
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Tile,
    {
        Self {
            cells: Array2::from_shape_fn((GRID_SIZE, GRID_SIZE), |(row, col)| f(row, col)),
        }
    }

    /// Wrap an existing tile matrix
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidLayoutShape`] unless the matrix is 15x15.
    pub fn from_cells(cells: Array2<Tile>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if (rows, cols) != (GRID_SIZE, GRID_SIZE) {
            return Err(DungeonError::InvalidLayoutShape { rows, cols });
        }
        Ok(Self { cells })
    }

    /// Tile at a grid position, `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get((row, col)).copied()
    }

    /// Replace the tile at a grid position
    ///
    /// Returns `false` if the position is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) -> bool {
        self.cells.get_mut((row, col)).map(|cell| *cell = tile).is_some()
    }

    /// Underlying tile matrix
    pub const fn cells(&self) -> &Array2<Tile> {
        &self.cells
    }

    /// Iterate tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells holding a concrete tile
    pub fn known_count(&self) -> usize {
        self.tiles().filter(|tile| !tile.is_unknown()).count()
    }

    /// Fill unknown cells from a fresh observation
    ///
    /// Cells that already hold a concrete tile are never overwritten. Returns the merged
    /// layout and whether any cell changed.
    pub fn merge_unknown(&self, observed: &Self) -> (Self, bool) {
        let mut merged = self.clone();
        let mut changed = false;

        for (cell, &seen) in merged.cells.iter_mut().zip(observed.cells.iter()) {
            if cell.is_unknown() && !seen.is_unknown() {
                *cell = seen;
                changed = true;
            }
        }

        (merged, changed)
    }

    /// Encode the layout as 450 uppercase hex characters
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileData`] if any tile cannot be packed.
    pub fn encode(&self) -> Result<String> {
        let mut encoded = String::with_capacity(ENCODED_LAYOUT_LEN);
        for tile in self.tiles() {
            encoded.push_str(&tile.encode()?);
        }
        Ok(encoded)
    }

    /// Decode a layout from its 450-character encoding
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidLayoutLength`] unless the input is exactly 450
    /// characters, or [`DungeonError::InvalidHexData`] if any pair is not hex.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = encoded.as_bytes();
        if bytes.len() != ENCODED_LAYOUT_LEN {
            return Err(DungeonError::InvalidLayoutLength {
                length: encoded.chars().count(),
            });
        }

        let tiles = bytes
            .chunks_exact(ENCODED_TILE_LEN)
            .map(|pair| parse_hex_byte(pair).map(Tile::from_byte))
            .collect::<Result<Vec<_>>>()?;

        debug_assert_eq!(tiles.len(), GRID_CELLS);
        let cells = Array2::from_shape_vec((GRID_SIZE, GRID_SIZE), tiles).map_err(|_shape| {
            DungeonError::InvalidLayoutLength {
                length: bytes.len(),
            }
        })?;

        Ok(Self { cells })
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::unknown()
    }
}

impl FromStr for Layout {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}
