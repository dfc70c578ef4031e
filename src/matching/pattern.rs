//! Constraint patterns compiled from partially observed layouts
//!
//! A pattern is a linear sequence of segments over the 450-character layout encoding.
//! Runs of unknown cells collapse into a single wildcard span; concrete cells become
//! literals, or a two-way alternation when the observation came from image recognition
//! and the tile has a known look-alike. Matching is anchored at both ends.

use crate::codec::{Layout, Tile};
use crate::io::configuration::ENCODED_TILE_LEN;
use crate::io::error::Result;
use crate::matching::confusable::alternative_for;
use std::fmt;

/// Where the concrete cells of a query layout came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Picked by a user; taken literally
    Selection,
    /// Produced by tile classification; confusable tiles match either member of their pair
    Recognition,
}

/// One compiled span of a constraint pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Exact encoded characters of one or more consecutive tiles
    Literal(Vec<u8>),
    /// Any `n` tiles (`2n` characters)
    Wildcard(usize),
    /// Exactly one tile, matching any of the listed encodings
    Alternation(Vec<[u8; ENCODED_TILE_LEN]>),
}

impl Segment {
    /// Number of tiles covered by this segment
    pub fn tiles(&self) -> usize {
        match self {
            Self::Literal(bytes) => bytes.len() / ENCODED_TILE_LEN,
            Self::Wildcard(count) => *count,
            Self::Alternation(_) => 1,
        }
    }
}

/// Compiled search pattern over encoded layout strings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintPattern {
    segments: Vec<Segment>,
}

impl ConstraintPattern {
    /// Compile a partially known layout into a pattern
    ///
    /// # Errors
    ///
    /// Returns [`crate::DungeonError::InvalidTileData`] if a concrete tile cannot be
    /// encoded.
    pub fn compile(layout: &Layout, observation: Observation) -> Result<Self> {
        let mut segments = Vec::new();
        let mut unknown_run = 0;

        for tile in layout.tiles() {
            if tile.is_unknown() {
                unknown_run += 1;
                continue;
            }

            if unknown_run > 0 {
                segments.push(Segment::Wildcard(unknown_run));
                unknown_run = 0;
            }

            let encoded = encode_pair(tile)?;
            match (observation, alternative_for(tile)) {
                (Observation::Recognition, Some(alternative)) => {
                    segments.push(Segment::Alternation(vec![
                        encoded,
                        encode_pair(alternative)?,
                    ]));
                }
                _ => push_literal(&mut segments, encoded),
            }
        }

        if unknown_run > 0 {
            segments.push(Segment::Wildcard(unknown_run));
        }

        Ok(Self { segments })
    }

    /// Compiled segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of tiles the pattern spans
    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::tiles).sum()
    }

    /// Whether the pattern constrains nothing
    pub fn is_unconstrained(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Wildcard(_)))
    }

    /// Test an encoded layout against the pattern
    ///
    /// The whole string must be consumed; a pattern never matches a prefix.
    pub fn is_match(&self, encoded: &str) -> bool {
        let mut rest = encoded.as_bytes();

        for segment in &self.segments {
            let width = segment.tiles() * ENCODED_TILE_LEN;
            let Some((head, tail)) = rest.split_at_checked(width) else {
                return false;
            };

            let accepted = match segment {
                Segment::Literal(bytes) => head == bytes.as_slice(),
                Segment::Wildcard(_) => true,
                Segment::Alternation(options) => {
                    options.iter().any(|option| head == option.as_slice())
                }
            };
            if !accepted {
                return false;
            }

            rest = tail;
        }

        rest.is_empty()
    }
}

fn encode_pair(tile: Tile) -> Result<[u8; ENCODED_TILE_LEN]> {
    let mut pair = [0; ENCODED_TILE_LEN];
    pair.copy_from_slice(tile.encode()?.as_bytes());
    Ok(pair)
}

// Adjacent exact tiles share one literal so the matcher compares them in one slice
fn push_literal(segments: &mut Vec<Segment>, encoded: [u8; ENCODED_TILE_LEN]) {
    if let Some(Segment::Literal(bytes)) = segments.last_mut() {
        bytes.extend_from_slice(&encoded);
    } else {
        segments.push(Segment::Literal(encoded.to_vec()));
    }
}

impl fmt::Display for ConstraintPattern {
    /// Regex-style rendering, e.g. `(..){3}0C(04|0C)(..){220}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes))?,
                Segment::Wildcard(count) => write!(f, "(..){{{count}}}")?,
                Segment::Alternation(options) => {
                    let rendered: Vec<_> = options
                        .iter()
                        .map(|option| String::from_utf8_lossy(option).into_owned())
                        .collect();
                    write!(f, "({})", rendered.join("|"))?;
                }
            }
        }
        Ok(())
    }
}
