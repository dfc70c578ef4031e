//! Tiles the classifier is known to confuse with one another
//!
//! Straight corridors (`0x01`) and T-junctions (`0x03`) differ by a few pixels at
//! minimap resolution. Pairs are symmetric and never chained: a tile maps to at most one
//! alternative.

use crate::codec::Tile;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Visually confusable tile pairs, validated against the reference tile sheet
pub const CONFUSABLE_PAIRS: [(Tile, Tile); 4] = [
    (Tile::new(0x01, 0), Tile::new(0x03, 0)),
    (Tile::new(0x01, 1), Tile::new(0x03, 1)),
    (Tile::new(0x01, 2), Tile::new(0x03, 2)),
    (Tile::new(0x01, 3), Tile::new(0x03, 3)),
];

static ALTERNATIVES: LazyLock<HashMap<Tile, Tile>> = LazyLock::new(|| {
    CONFUSABLE_PAIRS
        .iter()
        .flat_map(|&(a, b)| [(a, b), (b, a)])
        .collect()
});

/// The tile most likely mistaken for `tile`, if any
pub fn alternative_for(tile: Tile) -> Option<Tile> {
    ALTERNATIVES.get(&tile).copied()
}
