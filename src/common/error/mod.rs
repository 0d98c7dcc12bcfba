//! Unified error types for the style codec.
//!
//! Every public operation returns [`Result`], whose error side is the single
//! [`Error`] enum. Lower-level helpers keep their own small error types and
//! convert into it (see `conversions`).

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
