//! Error types for rankflow operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rankflow operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Data file parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two entries in the same year share an identity.
    #[error("Duplicate identity in one year: {identity}")]
    DuplicateIdentity {
        /// The identity that appeared more than once.
        identity: String,
    },

    /// An entry carries a rank below 1.
    #[error("Invalid rank {rank} for {identity}: ranks start at 1")]
    InvalidRank {
        /// The identity carrying the bad rank.
        identity: String,
        /// The offending rank value.
        rank: u32,
    },

    /// A requested year label is absent from the data set.
    #[error("Year not present in data: {0}")]
    MissingYear(String),

    /// Invalid dimensions for framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
