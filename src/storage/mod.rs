//! Reference corpus persistence

/// Corpus entries and their row encoding
pub mod dungeon;
/// JSON corpus import
pub mod import;
/// SQLite layout store
pub mod store;
