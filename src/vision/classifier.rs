//! Nearest-hash tile classification with an acceptance threshold

use crate::codec::Tile;
use crate::io::configuration::ACCEPTANCE_THRESHOLD;
use crate::io::error::{DungeonError, Result, invalid_parameter};
use crate::vision::catalogue::hashable_tiles;
use crate::vision::phash::{PerceptualHash, PerceptualHasher};
use crate::vision::sheet::TileSheet;
use image::RgbImage;
use tracing::debug;

/// A classified tile and how closely it matched, in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredTile {
    /// Best matching tile, or [`Tile::UNKNOWN`] below the threshold
    pub tile: Tile,
    /// Hash similarity of the match; 0.0 for unknown
    pub score: f64,
}

impl ScoredTile {
    /// The "don't know" result
    pub const UNKNOWN: Self = Self {
        tile: Tile::UNKNOWN,
        score: 0.0,
    };
}

/// Hashes of the catalogue artwork, computed once at construction
///
/// The cache is immutable after [`TileHashCache::build`] returns, so it can be shared
/// freely between threads.
#[derive(Clone, Debug)]
pub struct TileHashCache {
    hasher: PerceptualHasher,
    entries: Vec<(Tile, PerceptualHash)>,
}

impl TileHashCache {
    /// Hash the artwork of every tile in `catalogue`, preserving its order
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileSheet`] if the sheet lacks artwork for a
    /// catalogue tile.
    pub fn build(sheet: &TileSheet, catalogue: &[Tile]) -> Result<Self> {
        let hasher = PerceptualHasher::new();
        let entries = catalogue
            .iter()
            .map(|&tile| {
                let artwork = sheet
                    .tile_image(tile)
                    .ok_or_else(|| DungeonError::InvalidTileSheet {
                        reason: format!("no artwork for {tile}"),
                    })?;
                Ok((tile, hasher.hash(&artwork)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(tiles = entries.len(), "built tile hash cache");
        Ok(Self { hasher, entries })
    }

    /// Hash the default classification catalogue
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileSheet`] if the sheet lacks artwork for a
    /// hashable tile.
    pub fn from_sheet(sheet: &TileSheet) -> Result<Self> {
        Self::build(sheet, &hashable_tiles())
    }

    /// Cached `(tile, hash)` pairs in catalogue order
    pub fn entries(&self) -> &[(Tile, PerceptualHash)] {
        &self.entries
    }

    /// Number of cached tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hasher used for the catalogue, to hash queries identically
    pub const fn hasher(&self) -> &PerceptualHasher {
        &self.hasher
    }
}

/// Classifies tile images against a [`TileHashCache`]
#[derive(Clone, Debug)]
pub struct TileClassifier {
    cache: TileHashCache,
    threshold: f64,
}

impl TileClassifier {
    /// Classifier with the default acceptance threshold
    pub const fn new(cache: TileHashCache) -> Self {
        Self {
            cache,
            threshold: ACCEPTANCE_THRESHOLD,
        }
    }

    /// Classifier with a custom acceptance threshold
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidParameter`] unless `threshold` is within `[0, 1]`.
    pub fn with_threshold(cache: TileHashCache, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid_parameter(
                "threshold",
                &threshold,
                &"must be within [0, 1]",
            ));
        }
        Ok(Self { cache, threshold })
    }

    /// Minimum similarity for a concrete result
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Catalogue hashes
    pub const fn cache(&self) -> &TileHashCache {
        &self.cache
    }

    /// Closest catalogue tile to `image`
    ///
    /// Below the threshold the result is always [`ScoredTile::UNKNOWN`], never the
    /// nominal best match. Exact ties go to the earliest tile in catalogue order.
    pub fn classify(&self, image: &RgbImage) -> ScoredTile {
        let query = self.cache.hasher.hash(image);

        let mut best: Option<ScoredTile> = None;
        for &(tile, hash) in &self.cache.entries {
            let score = query.similarity(&hash);
            if best.is_none_or(|current| score > current.score) {
                best = Some(ScoredTile { tile, score });
            }
        }

        best.filter(|scored| scored.score >= self.threshold)
            .unwrap_or(ScoredTile::UNKNOWN)
    }
}
