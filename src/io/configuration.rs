//! Codec widths, recognition constants and runtime configuration defaults

// Grid geometry
/// Rows and columns of a dungeon minimap
pub const GRID_SIZE: usize = 15;
/// Number of cells in a layout
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;
/// Edge length of a single tile cell in pixels
pub const TILE_PIXELS: u32 = 16;
/// Edge length of the canonical grid image (16 px per cell)
pub const CANONICAL_GRID_PIXELS: u32 = TILE_PIXELS * GRID_SIZE as u32;
/// Number of rotations a tile can take
pub const ROTATIONS: u32 = 4;

// Encoding
/// Reserved byte for the unknown tile
pub const SENTINEL_BYTE: u8 = 0xFF;
/// Identity carried by the unknown tile
pub const SENTINEL_IDENTITY: u32 = 0xFFFF_FFFF;
/// Highest rotation index
pub const MAX_ROTATION: u8 = 3;
/// Characters per encoded tile
pub const ENCODED_TILE_LEN: usize = 2;
/// Characters per encoded layout
pub const ENCODED_LAYOUT_LEN: usize = GRID_CELLS * ENCODED_TILE_LEN;
/// Characters per encoded chest record (item, type, x, z)
pub const CHEST_RECORD_LEN: usize = 4 + 2 + 8 + 8;

// Perceptual hashing
/// Edge length tile images are resized to before hashing
pub const HASH_INPUT_PIXELS: u32 = 32;
/// Edge length of the low-frequency DCT block kept in the hash
pub const HASH_BLOCK: usize = 8;
/// Number of bits in a perceptual hash
pub const HASH_BITS: u32 = 64;

// Minimum similarity for a classification to be reported as a concrete tile
/// Default classifier acceptance threshold
pub const ACCEPTANCE_THRESHOLD: f64 = 0.90;

// Corpus
/// Number of entries in the complete reference corpus
pub const EXPECTED_CORPUS_SIZE: u64 = 21_475;
/// Hex digits in a corpus seed key
pub const SEED_KEY_LEN: usize = 8;
/// Records written per progress update during import
pub const IMPORT_PROGRESS_STEP: u64 = 256;

// Default file locations
/// Default location of the layout database
pub const DEFAULT_DATABASE_PATH: &str = "res/DUNGEONS.db";
/// Default location of the canonical tile sheet
pub const DEFAULT_TILE_SHEET_PATH: &str = "res/tiles.png";
