//! Error types for depworld-core.
//!
//! Consolidation itself never fails; these errors only arise at the I/O
//! boundary when reading input bundles or encoding output.

use thiserror::Error;

/// Result type alias for depworld-core operations.
pub type Result<T> = std::result::Result<T, DepworldError>;

/// Errors that can occur while loading input or exporting the world.
#[derive(Error, Debug)]
pub enum DepworldError {
    /// Input bundle could not be read from disk.
    #[error("Failed to read input bundle {path}: {source}")]
    ReadInput {
        /// Path that was read.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
