//! Binary data primitives shared by the style codecs.
//!
//! All multi-byte values in a style file are little-endian. Reading goes
//! through [`ByteReader`], a forward-only cursor that bounds-checks every
//! access, and writing through [`ByteWriter`], a growable buffer with typed
//! `write_*` methods. Neither type ever does manual offset arithmetic at the
//! call site, so a block can not drift out of alignment with its neighbours.

use zerocopy::{F32, FromBytes, I16, I32, LE, U16, U32};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

/// Forward-only little-endian reader over a borrowed byte slice.
///
/// # Examples
///
/// ```
/// use rgs_codec::common::binary::ByteReader;
///
/// let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
/// let mut reader = ByteReader::new(&data);
/// assert_eq!(reader.read_u16().unwrap(), 0x1234);
/// assert_eq!(reader.read_u32().unwrap(), 0x12345678);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader<'data> {
    data: &'data [u8],
    pos: usize,
}

impl<'data> ByteReader<'data> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'data [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> BinaryResult<&'data [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| BinaryError::ParseError(format!("Length overflow: {}", len)))?;
        if end > self.data.len() {
            return Err(BinaryError::InsufficientData {
                expected: end,
                available: self.data.len(),
            });
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read a fixed-size array, e.g. a magic signature.
    pub fn read_array<const N: usize>(&mut self) -> BinaryResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    #[inline]
    pub fn read_u16(&mut self) -> BinaryResult<u16> {
        let bytes = self.read_bytes(2)?;
        U16::<LE>::read_from_bytes(bytes)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
    }

    #[inline]
    pub fn read_i16(&mut self) -> BinaryResult<i16> {
        let bytes = self.read_bytes(2)?;
        I16::<LE>::read_from_bytes(bytes)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read i16".to_string()))
    }

    #[inline]
    pub fn read_u32(&mut self) -> BinaryResult<u32> {
        let bytes = self.read_bytes(4)?;
        U32::<LE>::read_from_bytes(bytes)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read u32".to_string()))
    }

    #[inline]
    pub fn read_i32(&mut self) -> BinaryResult<i32> {
        let bytes = self.read_bytes(4)?;
        I32::<LE>::read_from_bytes(bytes)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read i32".to_string()))
    }

    #[inline]
    pub fn read_f32(&mut self) -> BinaryResult<f32> {
        let bytes = self.read_bytes(4)?;
        F32::<LE>::read_from_bytes(bytes)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read f32".to_string()))
    }
}

/// Growable little-endian writer.
///
/// Writing into memory can not fail, so unlike the reader the methods here
/// return nothing. [`ByteWriter::patch_u32`] rewrites a previously reserved
/// field once its value is known.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Overwrite the u32 at `offset` that was written earlier.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4` lies beyond the bytes written so far.
    pub fn patch_u32(&mut self, offset: usize, value: u32) {
        self.buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Consume the writer and return the assembled buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl AsRef<[u8]> for ByteWriter {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x34, 0x12, // u16
            0xFF, 0xFF, // i16
            0x78, 0x56, 0x34, 0x12, // u32
            0x00, 0x00, 0x80, 0x3F, // f32 1.0
        ];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i16().unwrap(), -1);
        assert_eq!(reader.read_u32().unwrap(), 0x12345678);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&data);
        assert_eq!(
            reader.read_u32(),
            Err(BinaryError::InsufficientData {
                expected: 4,
                available: 3
            })
        );
        // A failed read does not consume anything
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_read_array() {
        let mut reader = ByteReader::new(b"rGS \x90\x01");
        assert_eq!(&reader.read_array::<4>().unwrap(), b"rGS ");
        assert_eq!(reader.read_u16().unwrap(), 400);
    }

    #[test]
    fn test_writer_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_u16(400);
        writer.write_i32(-7);
        writer.write_f32(2.5);
        writer.write_bytes(b"xy");
        assert_eq!(writer.len(), 12);

        let bytes = writer.into_inner();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u16().unwrap(), 400);
        assert_eq!(reader.read_i32().unwrap(), -7);
        assert_eq!(reader.read_f32().unwrap(), 2.5);
        assert_eq!(reader.read_bytes(2).unwrap(), b"xy");
    }

    #[test]
    fn test_patch_u32() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0);
        writer.write_u16(0xBEEF);
        writer.patch_u32(0, 0xDEADBEEF);
        assert_eq!(writer.as_ref(), &[0xEF, 0xBE, 0xAD, 0xDE, 0xEF, 0xBE]);
    }
}
