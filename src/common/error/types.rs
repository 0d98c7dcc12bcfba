//! Unified error type for style codec operations.
use thiserror::Error;

/// Main error type for style codec operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error surfaced from file helpers
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed style data: bad magic, truncated buffer, size mismatch
    #[error("Invalid format: {0}")]
    Format(String),

    /// Style file written by a newer format revision
    #[error("Unsupported style file version: {0}")]
    UnsupportedVersion(u16),

    /// Compressor or decompressor failure
    #[error("Compression error: {0}")]
    Compression(String),

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),
}

/// Result type for style codec operations.
pub type Result<T> = std::result::Result<T, Error>;
