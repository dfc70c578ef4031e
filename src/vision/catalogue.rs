//! Tiles that occur in the reference corpus
//!
//! Derived from a full scan of the corpus (see `LayoutStore::unique_tiles`). Not every
//! used tile can be told apart by perceptual hash: the blank floor variants hash almost
//! identically to each other, so they are left out of classification and only ever
//! enter a layout through user selection or a resolved match.

use crate::codec::Tile;

/// Every tile used by the reference corpus, unknown tile first
#[rustfmt::skip]
pub const USED_TILES: [Tile; 43] = [
    Tile::UNKNOWN,
    Tile::new(0x00, 0), Tile::new(0x00, 1), Tile::new(0x01, 0), Tile::new(0x01, 1),
    Tile::new(0x01, 2), Tile::new(0x01, 3), Tile::new(0x02, 0), Tile::new(0x03, 0),
    Tile::new(0x03, 1), Tile::new(0x03, 2), Tile::new(0x03, 3), Tile::new(0x05, 0),
    Tile::new(0x06, 0), Tile::new(0x07, 0), Tile::new(0x08, 0), Tile::new(0x09, 0),
    Tile::new(0x0A, 0), Tile::new(0x0B, 0), Tile::new(0x0C, 0), Tile::new(0x0D, 0),
    Tile::new(0x0E, 0), Tile::new(0x0F, 0), Tile::new(0x10, 0), Tile::new(0x11, 0),
    Tile::new(0x12, 0), Tile::new(0x13, 0), Tile::new(0x14, 0), Tile::new(0x15, 0),
    Tile::new(0x16, 0), Tile::new(0x17, 0), Tile::new(0x1A, 0), Tile::new(0x1B, 0),
    Tile::new(0x1E, 0), Tile::new(0x1F, 2), Tile::new(0x20, 0), Tile::new(0x24, 0),
    Tile::new(0x25, 0), Tile::new(0x26, 0), Tile::new(0x27, 0), Tile::new(0x28, 0),
    Tile::new(0x2D, 0), Tile::new(0x2E, 0),
];

/// Used tiles that perceptual hashing cannot reliably distinguish
pub const UNHASHABLE_TILES: [Tile; 2] = [Tile::new(0x00, 0), Tile::new(0x00, 1)];

/// Tiles the classifier compares against, in catalogue order
///
/// Order decides exact ties: the first tile reaching the best score wins.
pub fn hashable_tiles() -> Vec<Tile> {
    USED_TILES
        .iter()
        .copied()
        .filter(|tile| !tile.is_unknown() && !UNHASHABLE_TILES.contains(tile))
        .collect()
}

/// Tiles a user can pick from, without the unknown tile
pub fn selectable_tiles() -> &'static [Tile] {
    USED_TILES.get(1..).unwrap_or(&[])
}
