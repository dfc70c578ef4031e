//! Minimap recognition: tile artwork, perceptual hashing and classification
//!
//! This module contains:
//! - The tile catalogue and reference tile sheet
//! - Perceptual hashing and nearest-hash classification
//! - The image to layout pipeline and layout rendering

/// Tiles used by the corpus and which of them are hashable
pub mod catalogue;
/// Tile classification against cached hashes
pub mod classifier;
/// DCT perceptual hashes
pub mod phash;
/// Grid image to scored layout
pub mod pipeline;
/// Layout to minimap image
pub mod render;
/// Reference tile artwork
pub mod sheet;

pub use classifier::{ScoredTile, TileClassifier, TileHashCache};
pub use pipeline::ScoredLayout;
pub use sheet::TileSheet;
