//! Error types for grid construction and snapshot restore.

use thiserror::Error;

/// Errors returned by fallible grid operations.
///
/// Only construction and snapshot restore can fail. Stepping, clearing,
/// randomizing and direct cell mutation are total.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    InvalidDimension { width: u32, height: u32 },

    #[error("grid of {width}x{height} cells does not fit in memory")]
    TooLarge { width: u32, height: u32 },

    #[error("cell buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("snapshot claims {expected} live cells, buffer holds {actual}")]
    LiveCountMismatch { expected: usize, actual: usize },

    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
}
