//! Raw DEFLATE compression for font payloads.
//!
//! Style files carry bare DEFLATE streams with no zlib or gzip wrapper.
//! Compression is an optional feature: without it the writer stores every
//! block raw and the reader rejects compressed blocks with
//! [`Error::FeatureDisabled`].

use crate::common::error::{Error, Result};

/// Cap on the up-front allocation for inflated data; larger outputs grow
/// the buffer as real data arrives instead of trusting a size field.
#[cfg(feature = "compression")]
const MAX_PREALLOC: usize = 1 << 20;

/// Whether this build can compress and decompress.
#[inline]
pub const fn is_available() -> bool {
    cfg!(feature = "compression")
}

/// Compress `data` into a raw DEFLATE stream.
#[cfg(feature = "compression")]
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::Compression;
    use flate2::write::DeflateEncoder;
    use std::io::Write;

    let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len() / 2), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(format!("Compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::Compression(format!("Compression failed: {}", e)))
}

#[cfg(not(feature = "compression"))]
pub fn deflate(_data: &[u8]) -> Result<Vec<u8>> {
    Err(Error::FeatureDisabled("compression".to_string()))
}

/// Inflate a raw DEFLATE stream that must expand to exactly `expected_len`
/// bytes.
#[cfg(feature = "compression")]
pub fn inflate(data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    use flate2::read::DeflateDecoder;
    use std::io::Read;

    let mut out = Vec::with_capacity(expected_len.min(MAX_PREALLOC));
    // One byte of slack is enough to tell "too long" from "exact"
    let limit = expected_len as u64 + 1;
    DeflateDecoder::new(data)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(|e| Error::Format(format!("Decompression failed: {}", e)))?;

    if out.len() != expected_len {
        return Err(Error::Format(format!(
            "Decompressed size mismatch: expected {} bytes, got {}{}",
            expected_len,
            out.len(),
            if out.len() > expected_len { " or more" } else { "" }
        )));
    }
    Ok(out)
}

#[cfg(not(feature = "compression"))]
pub fn inflate(_data: &[u8], _expected_len: usize) -> Result<Vec<u8>> {
    Err(Error::FeatureDisabled("compression".to_string()))
}
