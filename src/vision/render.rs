//! Drawing layouts back into minimap images

use crate::codec::Layout;
use crate::io::configuration::{CANONICAL_GRID_PIXELS, TILE_PIXELS};
use crate::io::error::{DungeonError, Result};
use crate::vision::sheet::TileSheet;
use image::{RgbImage, imageops};
use std::path::Path;

/// Render `layout` as a 240x240 minimap using the sheet artwork
///
/// Unknown cells are drawn with the sheet's unknown-tile artwork.
///
/// # Errors
///
/// Returns [`DungeonError::InvalidTileSheet`] if the sheet lacks artwork for a tile in
/// the layout.
pub fn render_layout(sheet: &TileSheet, layout: &Layout) -> Result<RgbImage> {
    let mut canvas = RgbImage::new(CANONICAL_GRID_PIXELS, CANONICAL_GRID_PIXELS);

    for ((row, col), &tile) in layout.cells().indexed_iter() {
        let artwork = sheet
            .tile_image(tile)
            .ok_or_else(|| DungeonError::InvalidTileSheet {
                reason: format!("no artwork for {tile}"),
            })?;
        imageops::replace(
            &mut canvas,
            &artwork,
            i64::from(col as u32 * TILE_PIXELS),
            i64::from(row as u32 * TILE_PIXELS),
        );
    }

    Ok(canvas)
}

/// Render `layout` and save it as an image file
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn export_layout_png(sheet: &TileSheet, layout: &Layout, output_path: &Path) -> Result<()> {
    let canvas = render_layout(sheet, layout)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DungeonError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| DungeonError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
