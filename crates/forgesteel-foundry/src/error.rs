//! Error types for the forgesteel-foundry library.
//!
//! Resolution and validation never fail; these errors only come from loading
//! and writing records, catalogs and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for file-facing operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing a record to disk.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Reference catalog has an unusable shape.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for forgesteel-foundry operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
