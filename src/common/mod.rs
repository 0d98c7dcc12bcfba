//! Common types and utilities shared by the style table and the codecs.

// Submodule declarations
pub mod binary;
pub mod error;

// Re-exports for convenience
pub use binary::{BinaryError, ByteReader, ByteWriter};
pub use error::{Error, Result};
