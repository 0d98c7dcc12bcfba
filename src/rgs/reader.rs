//! Binary style decoder.

use crate::common::binary::ByteReader;
use crate::common::error::{Error, Result};
use crate::font::{FontAsset, FontType, GlyphInfo, Image, PixelFormat, Rectangle};
use crate::style::{PropertyTable, StyleChange};
use log::{debug, trace};

use super::MAGIC;
use super::compress;
use super::version::FormatVersion;

/// Bytes per entry of the change list.
const CHANGE_SIZE: usize = 8;
/// Bytes per glyph in both glyph blocks.
const GLYPH_RECORD_SIZE: usize = 16;

/// Everything read from a binary style file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStyle {
    /// Version field of the header, as stored
    pub version: u16,
    /// Changed properties, in file order
    pub changes: Vec<StyleChange>,
    pub font: Option<FontAsset>,
}

impl DecodedStyle {
    /// Layout the file was read with.
    pub fn format_version(&self) -> FormatVersion {
        // The version was validated when decoding
        FormatVersion::from_raw(self.version).unwrap_or(FormatVersion::CURRENT)
    }
}

/// Parse a binary style file.
///
/// Fails with [`Error::Format`] on a bad signature, truncated data or a
/// compressed block that does not inflate to its declared size, and with
/// [`Error::UnsupportedVersion`] for files newer than this crate knows.
///
/// # Examples
///
/// ```
/// use rgs_codec::rgs::{EncodeOptions, decode_binary, encode_binary};
/// use rgs_codec::style::{PropertyTable, StyleChange};
///
/// let baseline = PropertyTable::new();
/// let mut current = baseline.clone();
/// current.set(2, 12, 3);
///
/// let bytes = encode_binary(&current, &baseline, None, &EncodeOptions::default())?;
/// let decoded = decode_binary(&bytes)?;
/// assert_eq!(decoded.changes, vec![StyleChange::new(2, 12, 3)]);
/// assert!(decoded.font.is_none());
/// # Ok::<(), rgs_codec::Error>(())
/// ```
pub fn decode_binary(bytes: &[u8]) -> Result<DecodedStyle> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_array::<4>()?;
    if &magic != MAGIC {
        return Err(Error::Format(format!(
            "Not a style file: signature {:02X?}",
            magic
        )));
    }

    let version = reader.read_u16()?;
    let format = FormatVersion::from_raw(version)?;
    let _reserved = reader.read_u16()?;
    let count = reader.read_u32()? as usize;
    debug!("Decoding style v{}: {} properties", version, count);

    if count > reader.remaining() / CHANGE_SIZE {
        return Err(Error::Format(format!(
            "Truncated data: {} properties declared, {} bytes left",
            count,
            reader.remaining()
        )));
    }

    let mut changes = Vec::with_capacity(count);
    for _ in 0..count {
        let control = reader.read_u16()?;
        let property = reader.read_u16()?;
        let value = reader.read_u32()?;
        if !PropertyTable::contains(control as usize, property as usize) {
            return Err(Error::Format(format!(
                "Property slot out of range: control {}, property {}",
                control, property
            )));
        }
        changes.push(StyleChange::new(control, property, value));
    }

    // Only zero versus non-zero matters, the value itself is informational
    let font_data_size = reader.read_u32()?;
    let font = if font_data_size == 0 {
        None
    } else {
        Some(read_font(&mut reader, format)?)
    };

    if !reader.is_empty() {
        trace!("Ignoring {} trailing bytes", reader.remaining());
    }

    Ok(DecodedStyle {
        version,
        changes,
        font,
    })
}

/// Parse a binary style file and apply its properties to `table`.
///
/// The table is only touched once the whole file decoded successfully, so
/// on error it still holds its previous values. Properties are applied
/// slot by slot; use [`PropertyTable::load`] on the returned change list for
/// the toolkit's inheriting load behavior instead.
pub fn decode_binary_into(bytes: &[u8], table: &mut PropertyTable) -> Result<DecodedStyle> {
    let decoded = decode_binary(bytes)?;
    table.apply(&decoded.changes);
    Ok(decoded)
}

fn read_font(reader: &mut ByteReader<'_>, format: FormatVersion) -> Result<FontAsset> {
    let base_size = reader.read_u32()?;
    let glyph_count = reader.read_u32()? as usize;
    let font_type = FontType::from_raw(reader.read_u32()?)?;
    let white_rect = read_rect(reader)?;

    let atlas = read_atlas(reader)?;

    let block_len = glyph_count
        .checked_mul(GLYPH_RECORD_SIZE)
        .ok_or_else(|| Error::Format(format!("Glyph count too large: {}", glyph_count)))?;
    let layout = format.block_layout();

    let rects_data = layout.read_block(reader, block_len)?;
    let mut rects_reader = ByteReader::new(&rects_data);
    let recs = (0..glyph_count)
        .map(|_| read_rect(&mut rects_reader))
        .collect::<Result<Vec<_>>>()?;

    let glyphs_data = layout.read_block(reader, block_len)?;
    let mut glyphs_reader = ByteReader::new(&glyphs_data);
    let glyphs = (0..glyph_count)
        .map(|_| {
            Ok(GlyphInfo::new(
                glyphs_reader.read_i32()?,
                glyphs_reader.read_i32()?,
                glyphs_reader.read_i32()?,
                glyphs_reader.read_i32()?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Decoded font: {} glyphs, base size {}, {}x{} atlas",
        glyph_count, base_size, atlas.width, atlas.height
    );

    let mut font = FontAsset::new(base_size, atlas, white_rect, recs, glyphs)?;
    font.font_type = font_type;
    Ok(font)
}

fn read_atlas(reader: &mut ByteReader<'_>) -> Result<Image> {
    let uncompressed_len = reader.read_u32()? as usize;
    let compressed_len = reader.read_u32()? as usize;
    let width = reader.read_u32()?;
    let height = reader.read_u32()?;
    let format = PixelFormat::from_raw(reader.read_u32()?)?;

    let data = if compressed_len != uncompressed_len {
        trace!("Atlas compressed: {} -> {} bytes", compressed_len, uncompressed_len);
        compress::inflate(reader.read_bytes(compressed_len)?, uncompressed_len)?
    } else {
        reader.read_bytes(uncompressed_len)?.to_vec()
    };

    Image::new(width, height, format, data)
}

fn read_rect(reader: &mut ByteReader<'_>) -> Result<Rectangle> {
    Ok(Rectangle::new(
        reader.read_f32()?,
        reader.read_f32()?,
        reader.read_f32()?,
        reader.read_f32()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::binary::ByteWriter;
    use crate::rgs::{EncodeOptions, encode_binary};
    use proptest::prelude::*;

    fn sample_font() -> FontAsset {
        // 4x2 RGBA atlas so the encoder has to normalize it
        let pixels: Vec<u8> = (0..32u8).map(|i| i.wrapping_mul(37)).collect();
        let atlas = Image::new(4, 2, PixelFormat::R8G8B8A8, pixels).unwrap();
        let recs = vec![
            Rectangle::new(0.0, 0.0, 2.0, 2.0),
            Rectangle::new(2.0, 0.0, 1.5, 2.0),
            Rectangle::new(3.5, 0.25, 0.5, 1.75),
        ];
        let glyphs = vec![
            GlyphInfo::new(65, 0, 1, 3),
            GlyphInfo::new(66, -1, 0, 2),
            GlyphInfo::new(0x20AC, 0, -2, 1),
        ];
        FontAsset::new(16, atlas, Rectangle::new(3.0, 1.0, 1.0, 1.0), recs, glyphs).unwrap()
    }

    fn modified_table() -> (PropertyTable, PropertyTable) {
        let baseline = PropertyTable::raygui_default();
        let mut current = baseline.clone();
        current.set(0, 0, 0x112233ff);
        current.set(0, 16, 20);
        current.set(2, 12, 4);
        current.set(14, 21, 30);
        (current, baseline)
    }

    #[test]
    fn test_font_roundtrip() {
        let (current, baseline) = modified_table();
        let font = sample_font();

        for compress in [true, false] {
            let options = EncodeOptions::new().with_compress_font_data(compress);
            let bytes = encode_binary(&current, &baseline, Some(&font), &options).unwrap();
            let decoded = decode_binary(&bytes).unwrap();
            let decoded_font = decoded.font.unwrap();

            assert_eq!(decoded_font.recs, font.recs);
            assert_eq!(decoded_font.glyphs, font.glyphs);
            assert_eq!(decoded_font.white_rect, font.white_rect);
            assert_eq!(decoded_font.base_size, 16);
            assert_eq!(decoded_font.atlas, font.atlas.to_gray_alpha().unwrap());
        }
    }

    #[test]
    fn test_legacy_roundtrip() {
        let (current, baseline) = modified_table();
        let font = sample_font();
        let options = EncodeOptions::new().with_version(FormatVersion::V300);
        let bytes = encode_binary(&current, &baseline, Some(&font), &options).unwrap();

        let decoded = decode_binary(&bytes).unwrap();
        assert_eq!(decoded.version, 300);
        assert_eq!(decoded.format_version(), FormatVersion::V300);
        let decoded_font = decoded.font.unwrap();
        assert_eq!(decoded_font.recs, font.recs);
        assert_eq!(decoded_font.glyphs, font.glyphs);
    }

    #[test]
    fn test_legacy_blocks_have_no_prefix() {
        let (current, baseline) = modified_table();
        let font = sample_font();
        let legacy = encode_binary(
            &current,
            &baseline,
            Some(&font),
            &EncodeOptions::new().with_version(FormatVersion::V300),
        )
        .unwrap();
        let current_raw = encode_binary(
            &current,
            &baseline,
            Some(&font),
            &EncodeOptions::new().with_compress_font_data(false),
        )
        .unwrap();
        // Same payloads, minus two 4-byte size prefixes
        assert_eq!(legacy.len() + 8, current_raw.len());
    }

    #[test]
    fn test_bad_magic() {
        let (current, baseline) = modified_table();
        let mut bytes =
            encode_binary(&current, &baseline, None, &EncodeOptions::default()).unwrap();
        bytes[1] = b'X';

        let mut table = baseline.clone();
        let result = decode_binary_into(&bytes, &mut table);
        assert!(matches!(result, Err(Error::Format(_))));
        assert_eq!(table, baseline);
    }

    #[test]
    fn test_newer_version_rejected() {
        let table = PropertyTable::new();
        let mut bytes = encode_binary(&table, &table, None, &EncodeOptions::default()).unwrap();
        bytes[4..6].copy_from_slice(&500u16.to_le_bytes());
        assert!(matches!(decode_binary(&bytes), Err(Error::UnsupportedVersion(500))));
    }

    #[test]
    fn test_truncated_input() {
        let (current, baseline) = modified_table();
        let font = sample_font();
        let bytes = encode_binary(&current, &baseline, Some(&font), &EncodeOptions::default())
            .unwrap();
        for len in [0, 3, 11, 12, 20, bytes.len() - 1] {
            let result = decode_binary(&bytes[..len]);
            assert!(matches!(result, Err(Error::Format(_))), "length {} decoded", len);
        }
    }

    #[test]
    fn test_out_of_range_slot_rejected() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(MAGIC);
        writer.write_u16(400);
        writer.write_u16(0);
        writer.write_u32(1);
        writer.write_u16(16);
        writer.write_u16(0);
        writer.write_u32(1);
        writer.write_u32(0);
        assert!(matches!(decode_binary(writer.as_ref()), Err(Error::Format(_))));
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_atlas_size_mismatch() {
        let pixels = vec![0u8; 64];
        let packed = compress::deflate(&pixels).unwrap();

        let mut writer = ByteWriter::new();
        writer.write_bytes(MAGIC);
        writer.write_u16(400);
        writer.write_u16(0);
        writer.write_u32(0);
        writer.write_u32(1); // font present
        writer.write_u32(10);
        writer.write_u32(0);
        writer.write_u32(0);
        for _ in 0..4 {
            writer.write_f32(0.0);
        }
        writer.write_u32(128); // declared larger than the stream inflates to
        writer.write_u32(packed.len() as u32);
        writer.write_u32(8);
        writer.write_u32(8);
        writer.write_u32(PixelFormat::GrayAlpha.as_raw());
        writer.write_bytes(&packed);
        writer.write_u32(0);
        writer.write_u32(0);

        assert!(matches!(decode_binary(writer.as_ref()), Err(Error::Format(_))));
    }

    /// V400 file with no properties, up to and including the atlas header.
    fn font_header(
        glyph_count: u32,
        atlas_sizes: (u32, u32),
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> ByteWriter {
        let mut writer = ByteWriter::new();
        writer.write_bytes(MAGIC);
        writer.write_u16(400);
        writer.write_u16(0);
        writer.write_u32(0);
        writer.write_u32(1); // font present
        writer.write_u32(10);
        writer.write_u32(glyph_count);
        writer.write_u32(0);
        for _ in 0..4 {
            writer.write_f32(0.0);
        }
        writer.write_u32(atlas_sizes.0);
        writer.write_u32(atlas_sizes.1);
        writer.write_u32(width);
        writer.write_u32(height);
        writer.write_u32(format.as_raw());
        writer
    }

    #[test]
    fn test_oversized_atlas_rejected() {
        for side in [u32::MAX, 1 << 31] {
            let writer = font_header(0, (0, 0), side, side, PixelFormat::R32G32B32A32);
            assert!(
                matches!(decode_binary(writer.as_ref()), Err(Error::Format(_))),
                "{}x{} atlas decoded",
                side,
                side
            );
        }
    }

    #[cfg(not(feature = "compression"))]
    #[test]
    fn test_compressed_block_needs_feature() {
        let mut writer = font_header(1, (0, 0), 0, 0, PixelFormat::GrayAlpha);
        writer.write_u32(2); // compressed rectangle block
        writer.write_bytes(&[0x03, 0x00]);
        writer.write_u32(0);
        writer.write_bytes(&[0u8; GLYPH_RECORD_SIZE]);

        assert!(matches!(
            decode_binary(writer.as_ref()),
            Err(Error::FeatureDisabled(ref feature)) if feature == "compression"
        ));
    }

    #[cfg(not(feature = "compression"))]
    #[test]
    fn test_compressed_atlas_needs_feature() {
        let mut writer = font_header(0, (4, 3), 2, 1, PixelFormat::GrayAlpha);
        writer.write_bytes(&[0x63, 0x00, 0x00]);
        writer.write_u32(0);
        writer.write_u32(0);

        assert!(matches!(decode_binary(writer.as_ref()), Err(Error::FeatureDisabled(_))));
    }

    #[test]
    fn test_decode_into_applies_changes() {
        let (current, baseline) = modified_table();
        let bytes = encode_binary(&current, &baseline, None, &EncodeOptions::default()).unwrap();
        let mut table = baseline.clone();
        let decoded = decode_binary_into(&bytes, &mut table).unwrap();
        assert_eq!(decoded.changes.len(), 4);
        assert_eq!(table, current);
    }

    fn table_strategy() -> impl Strategy<Value = PropertyTable> {
        prop::collection::vec((0usize..16, 0usize..24, any::<u32>()), 0..40).prop_map(|sets| {
            let mut table = PropertyTable::raygui_default();
            for (control, prop, value) in sets {
                table.set(control, prop, value);
            }
            table
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_decoded_changes_match_engine(current in table_strategy()) {
            let baseline = PropertyTable::raygui_default();
            let options = EncodeOptions::new().with_embed_font(false);
            let bytes = encode_binary(&current, &baseline, None, &options).unwrap();

            // Encoding is deterministic
            prop_assert_eq!(&bytes, &encode_binary(&current, &baseline, None, &options).unwrap());

            let decoded = decode_binary(&bytes).unwrap();
            let expected = crate::style::compute_change_list(&current, &baseline);
            prop_assert_eq!(&decoded.changes, &expected);

            // Applying the list to the baseline sets exactly those slots
            let mut rebuilt = baseline.clone();
            rebuilt.apply(&decoded.changes);
            for control in 0..16 {
                for prop in 0..24 {
                    let listed = expected
                        .iter()
                        .any(|c| c.control as usize == control && c.property as usize == prop);
                    let source = if listed { &current } else { &baseline };
                    prop_assert_eq!(rebuilt.get(control, prop), source.get(control, prop));
                }
            }
        }
    }
}
