//! Captured minimap image to scored layout
//!
//! The image is brought to the canonical 240x240 resolution and cut into 225
//! non-overlapping 16x16 cells. Cells are classified independently in parallel and
//! reassembled by index, so processing order never affects the result.

use crate::codec::Layout;
use crate::io::configuration::{CANONICAL_GRID_PIXELS, GRID_CELLS, GRID_SIZE, TILE_PIXELS};
use crate::vision::classifier::{ScoredTile, TileClassifier};
use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

/// A layout where every cell carries its classification score
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredLayout {
    cells: Array2<ScoredTile>,
}

impl ScoredLayout {
    /// Scored cell at a grid position
    pub fn get(&self, row: usize, col: usize) -> Option<ScoredTile> {
        self.cells.get((row, col)).copied()
    }

    /// The tiles alone, with unrecognized cells unknown
    pub fn layout(&self) -> Layout {
        Layout::from_fn(|row, col| self.get(row, col).map_or(ScoredTile::UNKNOWN.tile, |c| c.tile))
    }

    /// Number of cells classified as a concrete tile
    pub fn recognized_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|scored| !scored.tile.is_unknown())
            .count()
    }

    /// Mean score over recognized cells, 0.0 if none were recognized
    pub fn mean_score(&self) -> f64 {
        let (total, count) = self
            .cells
            .iter()
            .filter(|scored| !scored.tile.is_unknown())
            .fold((0.0, 0_u32), |(total, count), scored| {
                (total + scored.score, count + 1)
            });
        if count == 0 {
            0.0
        } else {
            total / f64::from(count)
        }
    }
}

/// Resize `image` to the canonical grid resolution
///
/// Images already at 240x240 are used as they are.
pub fn to_canonical(image: &RgbImage) -> RgbImage {
    if image.dimensions() == (CANONICAL_GRID_PIXELS, CANONICAL_GRID_PIXELS) {
        image.clone()
    } else {
        imageops::resize(
            image,
            CANONICAL_GRID_PIXELS,
            CANONICAL_GRID_PIXELS,
            FilterType::Triangle,
        )
    }
}

/// Cut a canonical grid image into its cell at `(row, col)`
pub fn cell_image(canonical: &RgbImage, row: usize, col: usize) -> RgbImage {
    imageops::crop_imm(
        canonical,
        col as u32 * TILE_PIXELS,
        row as u32 * TILE_PIXELS,
        TILE_PIXELS,
        TILE_PIXELS,
    )
    .to_image()
}

/// Classify every cell of a captured minimap
///
/// `image` must already be cropped to the 15x15 grid; any resolution is accepted.
pub fn recognize_layout(classifier: &TileClassifier, image: &RgbImage) -> ScoredLayout {
    let canonical = to_canonical(image);

    let scored: Vec<ScoredTile> = (0..GRID_CELLS)
        .into_par_iter()
        .map(|index| {
            let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
            classifier.classify(&cell_image(&canonical, row, col))
        })
        .collect();

    let cells = Array2::from_shape_fn((GRID_SIZE, GRID_SIZE), |(row, col)| {
        scored
            .get(row * GRID_SIZE + col)
            .copied()
            .unwrap_or(ScoredTile::UNKNOWN)
    });
    let layout = ScoredLayout { cells };

    debug!(
        recognized = layout.recognized_count(),
        mean_score = layout.mean_score(),
        "recognized layout"
    );
    layout
}
