//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::common::binary::BinaryError;

// A short read anywhere in a style buffer means the file is truncated
impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        match err {
            BinaryError::InsufficientData {
                expected,
                available,
            } => Error::Format(format!(
                "Truncated data: needed {} bytes, only {} available",
                expected, available
            )),
            BinaryError::ParseError(msg) => Error::Format(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_error_becomes_format_error() {
        let err: Error = BinaryError::InsufficientData {
            expected: 16,
            available: 12,
        }
        .into();
        assert!(matches!(err, Error::Format(ref msg) if msg.contains("16") && msg.contains("12")));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::UnsupportedVersion(500).to_string(),
            "Unsupported style file version: 500"
        );
        assert_eq!(
            Error::FeatureDisabled("compression".into()).to_string(),
            "Feature 'compression' is disabled. Enable it with --features compression"
        );
    }
}
