//! Dungeon layout identification from partial minimap observations
//!
//! A reference corpus of fully known 15x15 layouts is stored as fixed-width hex strings.
//! A partial observation, either selected by hand or recognized from a minimap capture,
//! is compiled into a constraint pattern and matched against the corpus; when exactly one
//! layout survives, the whole dungeon is known.

#![forbid(unsafe_code)]

/// Hex encodings of tiles, layouts and treasure
pub mod codec;
/// Input/output operations and error handling
pub mod io;
/// Constraint compilation and corpus lookup
pub mod matching;
/// Persistent layout corpus and its offline builder
pub mod storage;
/// Minimap image recognition and rendering
pub mod vision;

pub use io::error::{DungeonError, Result};
