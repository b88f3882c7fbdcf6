//! Error types for the `.biom` codec.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BiomError.
pub type Result<T> = std::result::Result<T, BiomError>;

/// Main error type for `.biom` parsing, building, and image mapping.
#[derive(Error, Debug)]
pub enum BiomError {
    /// A constant field in the binary layout did not match its expected value.
    #[error("format error in `{field}` at offset {offset}: expected {expected:#x}, found {actual:#x}")]
    Format {
        field: &'static str,
        offset: usize,
        expected: u64,
        actual: u64,
    },

    /// The input ended before a field could be read in full.
    #[error("unexpected end of data in `{field}` at offset {offset}: {needed} more bytes required")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
    },

    /// Bytes were left over after the final field.
    #[error("{remaining} trailing bytes after the final field")]
    TrailingBytes { remaining: usize },

    /// A hemisphere grid did not have the required flat length.
    #[error("grid `{field}` has {actual} elements, expected {expected}")]
    GridLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An editing image did not have the required dimensions.
    #[error("image is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    ImageDimensions {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// An id occurred in a grid but is absent from the active id table.
    #[error("id {id:#x} is not present in the active id table")]
    UnknownId { id: u32 },

    /// An index has no entry in the active index table or palette.
    #[error("index {index} is out of range (table holds {limit} entries)")]
    IndexOutOfRange { index: usize, limit: usize },

    /// A planet manifest listed no biome ids.
    #[error("a planet needs at least one biome id")]
    NoBiomes,

    /// A path that should name a `.biom` file does not.
    #[error("expected a `.biom` path, found {0:?}")]
    NotBiom(PathBuf),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
