//! Hex codecs for tiles, layouts and treasure records
//!
//! Every persisted value is an uppercase hex string with fixed-width fields and no
//! separators, so layouts can be matched as plain strings.

/// Strict fixed-width hex field parsing
pub mod hex;
/// Fixed 15x15 layouts and their 450-character encoding
pub mod layout;
/// Tile value type and its byte encoding
pub mod tile;
/// Chest records and treasure lists
pub mod treasure;

pub use layout::Layout;
pub use tile::Tile;
pub use treasure::{Chest, Treasure};
