//! DCT-based perceptual hashing
//!
//! The image is reduced to 32x32 luma and transformed with an orthonormal 2D DCT-II.
//! The top-left 8x8 block holds the lowest frequencies; with the DC term zeroed, each
//! coefficient contributes one bit: set when it exceeds the block mean.

use crate::io::configuration::{HASH_BITS, HASH_BLOCK, HASH_INPUT_PIXELS};
use bitvec::prelude::*;
use image::imageops::{self, FilterType};
use image::{Luma, RgbImage};
use ndarray::Array2;
use std::f64::consts::PI;
use std::fmt;

/// 64-bit perceptual fingerprint of an image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PerceptualHash(u64);

impl PerceptualHash {
    /// Wrap raw hash bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw hash bits, coefficient `i` of the 8x8 block at bit `i`
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Number of differing bits
    pub const fn distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Similarity in `[0, 1]`: `1 - distance / 64`
    pub fn similarity(&self, other: &Self) -> f64 {
        1.0 - f64::from(self.distance(other)) / f64::from(HASH_BITS)
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

/// Computes perceptual hashes with a precomputed DCT basis
#[derive(Clone, Debug)]
pub struct PerceptualHasher {
    basis: Array2<f64>,
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PerceptualHasher {
    /// Build the 32x32 DCT-II basis
    pub fn new() -> Self {
        let n = HASH_INPUT_PIXELS as usize;
        let size = n as f64;
        let basis = Array2::from_shape_fn((n, n), |(k, i)| {
            let scale = if k == 0 {
                (1.0 / size).sqrt()
            } else {
                (2.0 / size).sqrt()
            };
            scale * (PI * (2.0 * i as f64 + 1.0) * k as f64 / (2.0 * size)).cos()
        });
        Self { basis }
    }

    /// Hash an image of any size
    pub fn hash(&self, image: &RgbImage) -> PerceptualHash {
        let luma = imageops::grayscale(image);
        let resized = imageops::resize(
            &luma,
            HASH_INPUT_PIXELS,
            HASH_INPUT_PIXELS,
            FilterType::Triangle,
        );

        let n = HASH_INPUT_PIXELS as usize;
        let pixels = Array2::from_shape_fn((n, n), |(y, x)| {
            resized
                .get_pixel_checked(x as u32, y as u32)
                .map_or(0.0, |&Luma([value])| f64::from(value))
        });

        let coefficients = self.basis.dot(&pixels).dot(&self.basis.t());
        // Lowest frequencies only, with the DC term dropped
        let block = Array2::from_shape_fn((HASH_BLOCK, HASH_BLOCK), |(v, u)| match (v, u) {
            (0, 0) => 0.0,
            _ => coefficients.get((v, u)).copied().unwrap_or(0.0),
        });
        let mean = block.sum() / block.len() as f64;

        let mut bits = bitarr![u64, Lsb0; 0; 64];
        for (index, &coefficient) in block.iter().enumerate() {
            bits.set(index, coefficient > mean);
        }
        let [word] = bits.into_inner();

        PerceptualHash(word)
    }
}
