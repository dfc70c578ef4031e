//! Error types and record context for codec, storage and recognition operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all dungeon identification operations
#[derive(Debug)]
pub enum DungeonError {
    /// Tile cannot be packed into a single byte
    InvalidTileData {
        /// Tile identity that was being encoded
        identity: u32,
        /// Tile rotation that was being encoded
        rotation: u8,
    },

    /// Encoded data contains characters outside `0-9A-Fa-f`
    InvalidHexData {
        /// The offending fragment
        data: String,
    },

    /// Encoded layout string is not exactly 450 characters
    InvalidLayoutLength {
        /// Length of the rejected input
        length: usize,
    },

    /// Tile matrix does not have the fixed 15x15 shape
    InvalidLayoutShape {
        /// Rows of the rejected matrix
        rows: usize,
        /// Columns of the rejected matrix
        cols: usize,
    },

    /// Encoded treasure string is not a whole number of chest records
    InvalidTreasureLength {
        /// Length of the rejected input
        length: usize,
    },

    /// Writing to the layout store failed
    StorageWrite {
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying database error
        source: rusqlite::Error,
    },

    /// Reading from the layout store failed
    StorageRead {
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying database error
        source: rusqlite::Error,
    },

    /// A persisted row could not be decoded
    ///
    /// Only the named record is unusable; the rest of the corpus is unaffected.
    CorruptRecord {
        /// Seed of the malformed row
        seed: i64,
        /// Description of what's wrong with the row
        reason: String,
    },

    /// Tile sheet doesn't have the expected cell geometry
    InvalidTileSheet {
        /// Description of what's wrong with the sheet
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load an image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Corpus file is not valid JSON of the expected shape
    CorpusFormat {
        /// Path to the corpus file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
}

impl fmt::Display for DungeonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileData { identity, rotation } => {
                write!(f, "Invalid tile data ({identity:#X}, {rotation})")
            }
            Self::InvalidHexData { data } => {
                write!(f, "Invalid hex data '{data}'")
            }
            Self::InvalidLayoutLength { length } => {
                write!(f, "Invalid layout string length ({length})")
            }
            Self::InvalidLayoutShape { rows, cols } => {
                write!(f, "Invalid layout shape {rows}x{cols}")
            }
            Self::InvalidTreasureLength { length } => {
                write!(f, "Invalid treasure string length ({length})")
            }
            Self::StorageWrite { operation, source } => {
                write!(f, "Storage write error during {operation}: {source}")
            }
            Self::StorageRead { operation, source } => {
                write!(f, "Storage read error during {operation}: {source}")
            }
            Self::CorruptRecord { seed, reason } => {
                write!(f, "Corrupt record for seed {seed}: {reason}")
            }
            Self::InvalidTileSheet { reason } => {
                write!(f, "Invalid tile sheet: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::CorpusFormat { path, source } => {
                write!(f, "Malformed corpus file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DungeonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StorageWrite { source, .. } | Self::StorageRead { source, .. } => Some(source),
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::CorpusFormat { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for dungeon results
pub type Result<T> = std::result::Result<T, DungeonError>;

/// Attributes decode failures to the persisted record they came from
pub trait WithRecord<T> {
    /// Convert a codec error into [`DungeonError::CorruptRecord`] for `seed`
    ///
    /// # Errors
    ///
    /// Propagates the original error, rewritten as a corrupt-record error when it
    /// was raised by a codec
    fn for_record(self, seed: i64) -> Result<T>;
}

impl<T, E> WithRecord<T> for std::result::Result<T, E>
where
    E: Into<DungeonError>,
{
    fn for_record(self, seed: i64) -> Result<T> {
        self.map_err(|e| {
            let error = e.into();
            match error {
                DungeonError::InvalidTileData { .. }
                | DungeonError::InvalidHexData { .. }
                | DungeonError::InvalidLayoutLength { .. }
                | DungeonError::InvalidLayoutShape { .. }
                | DungeonError::InvalidTreasureLength { .. } => DungeonError::CorruptRecord {
                    seed,
                    reason: error.to_string(),
                },
                other => other,
            }
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DungeonError {
    DungeonError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a storage read error
pub const fn read_error(operation: &'static str, source: rusqlite::Error) -> DungeonError {
    DungeonError::StorageRead { operation, source }
}

/// Create a storage write error
pub const fn write_error(operation: &'static str, source: rusqlite::Error) -> DungeonError {
    DungeonError::StorageWrite { operation, source }
}
