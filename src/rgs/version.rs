//! Format revisions and their block layouts.
//!
//! The revisions differ only in how the two glyph blocks of an embedded
//! font are framed. Rather than testing the version number at every block,
//! a [`FormatVersion`] hands out a [`BlockLayout`] and the font writer and
//! reader go through it for each block.

use crate::common::binary::{ByteReader, ByteWriter};
use crate::common::error::{Error, Result};
use log::{debug, trace};

use super::compress;

/// Style file format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FormatVersion {
    /// Legacy layout: glyph blocks are always stored raw, no size prefix
    V300,
    /// Current layout: glyph blocks carry a compressed-size prefix
    #[default]
    V400,
}

impl FormatVersion {
    /// Newest revision this crate reads and writes.
    pub const CURRENT: Self = Self::V400;

    /// Map the version field of a file header.
    ///
    /// Anything newer than [`Self::CURRENT`] is rejected; revisions older
    /// than 400 all share the legacy layout.
    pub fn from_raw(raw: u16) -> Result<Self> {
        match raw {
            400 => Ok(Self::V400),
            r if r > 400 => Err(Error::UnsupportedVersion(r)),
            _ => Ok(Self::V300),
        }
    }

    /// Value written to the file header.
    pub const fn as_raw(self) -> u16 {
        match self {
            Self::V300 => 300,
            Self::V400 => 400,
        }
    }

    pub(crate) const fn block_layout(self) -> BlockLayout {
        match self {
            Self::V300 => BlockLayout::Raw,
            Self::V400 => BlockLayout::SizePrefixed,
        }
    }
}

/// Framing of a glyph data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockLayout {
    /// Payload bytes only
    Raw,
    /// `u32` compressed size (0 = raw payload follows), then the payload
    SizePrefixed,
}

impl BlockLayout {
    /// Write one block. `compress` is a request: it is ignored by the raw
    /// layout and by builds without compression support.
    pub(crate) fn write_block(
        self,
        writer: &mut ByteWriter,
        payload: &[u8],
        compress: bool,
    ) -> Result<()> {
        match self {
            BlockLayout::Raw => {
                writer.write_bytes(payload);
            },
            BlockLayout::SizePrefixed if compress && compress::is_available() => {
                let packed = compress::deflate(payload)?;
                trace!("Block compressed: {} -> {} bytes", payload.len(), packed.len());
                writer.write_u32(block_len(packed.len())?);
                writer.write_bytes(&packed);
            },
            BlockLayout::SizePrefixed => {
                if compress {
                    debug!("Compression unavailable, storing {} byte block raw", payload.len());
                }
                writer.write_u32(0);
                writer.write_bytes(payload);
            },
        }
        Ok(())
    }

    /// Read one block whose decoded payload is `expected_len` bytes long.
    pub(crate) fn read_block(
        self,
        reader: &mut ByteReader<'_>,
        expected_len: usize,
    ) -> Result<Vec<u8>> {
        match self {
            BlockLayout::Raw => Ok(reader.read_bytes(expected_len)?.to_vec()),
            BlockLayout::SizePrefixed => {
                let packed_len = reader.read_u32()? as usize;
                if packed_len == 0 {
                    Ok(reader.read_bytes(expected_len)?.to_vec())
                } else {
                    let packed = reader.read_bytes(packed_len)?;
                    compress::inflate(packed, expected_len)
                }
            },
        }
    }
}

/// Convert a length to the `u32` stored in size fields.
pub(crate) fn block_len(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| Error::Format(format!("Block too large for a style file: {} bytes", len)))
}
