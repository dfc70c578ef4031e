//! Chest records and the fixed-width treasure encoding
//!
//! Each chest is 22 hex characters: item (4), type (2), then the raw IEEE-754 bits of
//! `x` and `z` (8 each), all big-endian. Coordinates are carried bit for bit.

use crate::codec::hex::parse_hex;
use crate::io::configuration::CHEST_RECORD_LEN;
use crate::io::error::{DungeonError, Result};

/// One treasure chest placed in a dungeon
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chest {
    /// Item contained in the chest
    pub item: u16,
    /// Chest type
    pub kind: u8,
    /// World x coordinate
    pub x: f32,
    /// World z coordinate
    pub z: f32,
}

impl Chest {
    /// Encode the chest as a 22-character record
    pub fn encode(&self) -> String {
        format!(
            "{:04X}{:02X}{:08X}{:08X}",
            self.item,
            self.kind,
            self.x.to_bits(),
            self.z.to_bits()
        )
    }

    /// Decode a chest from a 22-character record
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTreasureLength`] if the record is not 22
    /// characters, or [`DungeonError::InvalidHexData`] if a field is not hex.
    pub fn decode(record: &str) -> Result<Self> {
        Self::decode_bytes(record.as_bytes())
    }

    fn decode_bytes(record: &[u8]) -> Result<Self> {
        let (Some(item), Some(kind), Some(x), Some(z)) = (
            record.get(0..4),
            record.get(4..6),
            record.get(6..14),
            record.get(14..22),
        ) else {
            return Err(DungeonError::InvalidTreasureLength {
                length: record.len(),
            });
        };
        if record.len() != CHEST_RECORD_LEN {
            return Err(DungeonError::InvalidTreasureLength {
                length: record.len(),
            });
        }

        Ok(Self {
            item: parse_hex(item)? as u16,
            kind: parse_hex(kind)? as u8,
            x: f32::from_bits(parse_hex(x)?),
            z: f32::from_bits(parse_hex(z)?),
        })
    }

    /// Bitwise equality, distinguishing `-0.0` from `0.0` and matching identical NaNs
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.item == other.item
            && self.kind == other.kind
            && self.x.to_bits() == other.x.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

/// Ordered chest list of a dungeon; position matches in-game chest numbering
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Treasure {
    chests: Vec<Chest>,
}

impl Treasure {
    /// Wrap an ordered list of chests
    pub const fn new(chests: Vec<Chest>) -> Self {
        Self { chests }
    }

    /// Chests in order
    pub fn chests(&self) -> &[Chest] {
        &self.chests
    }

    /// Number of chests
    pub fn len(&self) -> usize {
        self.chests.len()
    }

    /// Whether the dungeon has no chests
    pub fn is_empty(&self) -> bool {
        self.chests.is_empty()
    }

    /// Encode all chests as concatenated records
    pub fn encode(&self) -> String {
        let mut encoded = String::with_capacity(self.chests.len() * CHEST_RECORD_LEN);
        for chest in &self.chests {
            encoded.push_str(&chest.encode());
        }
        encoded
    }

    /// Decode concatenated chest records
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTreasureLength`] if the length is not a multiple
    /// of 22, or [`DungeonError::InvalidHexData`] if any field is not hex.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = encoded.as_bytes();
        if bytes.len() % CHEST_RECORD_LEN != 0 {
            return Err(DungeonError::InvalidTreasureLength {
                length: bytes.len(),
            });
        }

        let chests = bytes
            .chunks_exact(CHEST_RECORD_LEN)
            .map(Chest::decode_bytes)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { chests })
    }

    /// Bitwise equality of every chest, in order
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.chests.len() == other.chests.len()
            && self
                .chests
                .iter()
                .zip(&other.chests)
                .all(|(a, b)| a.bit_eq(b))
    }
}

impl From<Vec<Chest>> for Treasure {
    fn from(chests: Vec<Chest>) -> Self {
        Self::new(chests)
    }
}
