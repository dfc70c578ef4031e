//! The canonical tile sheet
//!
//! A grid of 16 px cells: column is rotation, row is identity + 1. Row 0 holds the
//! artwork drawn for the unknown tile at column 0.

use crate::codec::Tile;
use crate::io::configuration::{ROTATIONS, TILE_PIXELS};
use crate::io::error::{DungeonError, Result};
use image::{RgbImage, imageops};
use std::path::Path;

/// Reference artwork for every tile
#[derive(Clone, Debug)]
pub struct TileSheet {
    image: RgbImage,
}

impl TileSheet {
    /// Load a tile sheet from an image file
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::ImageLoad`] if the file cannot be decoded, or
    /// [`DungeonError::InvalidTileSheet`] if its dimensions are not whole cells.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| DungeonError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_image(image.to_rgb8())
    }

    /// Wrap an in-memory sheet
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileSheet`] unless the sheet is at least four
    /// cells wide, at least one cell tall, and a whole number of cells in each direction.
    pub fn from_image(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width < TILE_PIXELS * ROTATIONS
            || height < TILE_PIXELS
            || width % TILE_PIXELS != 0
            || height % TILE_PIXELS != 0
        {
            return Err(DungeonError::InvalidTileSheet {
                reason: format!(
                    "{width}x{height} is not a grid of {TILE_PIXELS} px cells with {ROTATIONS} columns"
                ),
            });
        }
        Ok(Self { image })
    }

    /// Sheet dimensions in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Top-left pixel of a tile's cell, `None` if the cell lies outside the sheet
    pub fn cell_origin(&self, tile: Tile) -> Option<(u32, u32)> {
        let (x, y) = if tile.is_unknown() {
            (0, 0)
        } else {
            let column = u32::from(tile.rotation());
            if column >= ROTATIONS {
                return None;
            }
            let row = tile.identity().checked_add(1)?;
            (column * TILE_PIXELS, row.checked_mul(TILE_PIXELS)?)
        };

        let (width, height) = self.image.dimensions();
        (x + TILE_PIXELS <= width && y.checked_add(TILE_PIXELS)? <= height).then_some((x, y))
    }

    /// Whether the sheet has artwork for `tile`
    pub fn contains(&self, tile: Tile) -> bool {
        self.cell_origin(tile).is_some()
    }

    /// Copy of the 16x16 artwork for `tile`
    pub fn tile_image(&self, tile: Tile) -> Option<RgbImage> {
        let (x, y) = self.cell_origin(tile)?;
        Some(imageops::crop_imm(&self.image, x, y, TILE_PIXELS, TILE_PIXELS).to_image())
    }
}
