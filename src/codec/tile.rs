//! Tile value type and its single-byte hex encoding
//!
//! A concrete tile packs as `(identity << 2) + rotation`. The unknown tile owns the
//! reserved byte `0xFF` and always carries rotation 0, so every byte decodes to some
//! tile while only in-range tiles encode.

use crate::codec::hex::parse_hex_byte;
use crate::io::configuration::{MAX_ROTATION, SENTINEL_BYTE, SENTINEL_IDENTITY};
use crate::io::error::{DungeonError, Result};
use std::fmt;

/// One cell of a dungeon minimap: a tile shape and its rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    identity: u32,
    rotation: u8,
}

impl Tile {
    /// The unknown/wildcard tile
    pub const UNKNOWN: Self = Self {
        identity: SENTINEL_IDENTITY,
        rotation: 0,
    };

    /// Create a tile from its identity and rotation
    ///
    /// Range checks happen at encode time. Passing the sentinel identity always yields
    /// [`Tile::UNKNOWN`].
    pub const fn new(identity: u32, rotation: u8) -> Self {
        if identity == SENTINEL_IDENTITY {
            Self::UNKNOWN
        } else {
            Self { identity, rotation }
        }
    }

    /// Shape identity
    pub const fn identity(&self) -> u32 {
        self.identity
    }

    /// Quarter-turn rotation (0-3)
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether this is the unknown/wildcard tile
    pub const fn is_unknown(&self) -> bool {
        self.identity == SENTINEL_IDENTITY
    }

    /// Pack the tile into its byte representation
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileData`] if the rotation exceeds 3 or the
    /// packed value does not fit below the reserved sentinel byte.
    pub fn to_byte(&self) -> Result<u8> {
        if self.is_unknown() {
            return Ok(SENTINEL_BYTE);
        }

        let packed = (u64::from(self.identity) << 2) | u64::from(self.rotation);
        if self.rotation > MAX_ROTATION || packed >= u64::from(SENTINEL_BYTE) {
            return Err(DungeonError::InvalidTileData {
                identity: self.identity,
                rotation: self.rotation,
            });
        }

        Ok(packed as u8)
    }

    /// Unpack a tile from its byte representation
    pub const fn from_byte(byte: u8) -> Self {
        if byte == SENTINEL_BYTE {
            Self::UNKNOWN
        } else {
            Self {
                identity: (byte >> 2) as u32,
                rotation: byte & 0b11,
            }
        }
    }

    /// Encode the tile as two uppercase hex characters
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTileData`] if the tile cannot be packed.
    pub fn encode(&self) -> Result<String> {
        Ok(format!("{:02X}", self.to_byte()?))
    }

    /// Decode a tile from two hex characters
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidHexData`] unless the input is exactly two hex
    /// characters.
    pub fn decode(encoded: &str) -> Result<Self> {
        parse_hex_byte(encoded.as_bytes()).map(Self::from_byte)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "Tile(unknown)")
        } else {
            write!(f, "Tile({:#04X}, {})", self.identity, self.rotation)
        }
    }
}
