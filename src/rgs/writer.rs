//! Binary style encoder.

use crate::common::binary::ByteWriter;
use crate::common::error::{Error, Result};
use crate::font::{FontAsset, GlyphInfo, Image, PixelFormat, Rectangle};
use crate::style::{PropertyTable, StyleChange, compute_change_list};
use log::{debug, warn};

use super::MAGIC;
use super::compress;
use super::options::EncodeOptions;
use super::version::{FormatVersion, block_len};

/// Encode the changes of `current` against `baseline`, plus an optional
/// font, as a binary style file.
///
/// The font is embedded only when `options.embed_font` is set. Inputs are
/// never modified, and encoding the same inputs twice gives identical bytes.
///
/// # Examples
///
/// ```
/// use rgs_codec::rgs::{EncodeOptions, encode_binary};
/// use rgs_codec::style::PropertyTable;
///
/// let baseline = PropertyTable::new();
/// let mut current = baseline.clone();
/// current.set(0, 1, 0xFF00FF00);
///
/// let bytes = encode_binary(&current, &baseline, None, &EncodeOptions::default())?;
/// assert_eq!(&bytes[..4], b"rGS ");
/// assert_eq!(bytes.len(), 24);
/// # Ok::<(), rgs_codec::Error>(())
/// ```
pub fn encode_binary(
    current: &PropertyTable,
    baseline: &PropertyTable,
    font: Option<&FontAsset>,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let changes = compute_change_list(current, baseline);
    let font = font.filter(|_| options.embed_font);
    debug!(
        "Encoding style v{}: {} changed properties, font: {}",
        options.version.as_raw(),
        changes.len(),
        font.is_some()
    );

    let mut writer = ByteWriter::with_capacity(16 + changes.len() * 8);
    write_header(&mut writer, options.version, &changes)?;

    match font {
        Some(font) => write_font(&mut writer, font, options)?,
        None => writer.write_u32(0),
    }

    Ok(writer.into_inner())
}

fn write_header(
    writer: &mut ByteWriter,
    version: FormatVersion,
    changes: &[StyleChange],
) -> Result<()> {
    writer.write_bytes(MAGIC);
    writer.write_u16(version.as_raw());
    writer.write_u16(0);
    writer.write_u32(block_len(changes.len())?);
    for change in changes {
        writer.write_u16(change.control);
        writer.write_u16(change.property);
        writer.write_u32(change.value);
    }
    Ok(())
}

fn write_font(writer: &mut ByteWriter, font: &FontAsset, options: &EncodeOptions) -> Result<()> {
    if font.recs.len() != font.glyphs.len() {
        return Err(Error::Format(format!(
            "Glyph count mismatch: {} rectangles for {} glyphs",
            font.recs.len(),
            font.glyphs.len()
        )));
    }

    // Patched below with the size of everything that follows it
    let size_offset = writer.len();
    writer.write_u32(0);
    let start = writer.len();

    writer.write_u32(font.base_size);
    writer.write_u32(block_len(font.glyph_count())?);
    writer.write_u32(font.font_type.as_raw());
    write_rect(writer, &font.white_rect);

    let atlas = EncodedAtlas::new(&font.atlas)?;
    writer.write_u32(block_len(atlas.image.data.len())?);
    writer.write_u32(block_len(atlas.data.len())?);
    writer.write_u32(atlas.image.width);
    writer.write_u32(atlas.image.height);
    writer.write_u32(atlas.image.format.as_raw());
    writer.write_bytes(&atlas.data);

    let layout = options.version.block_layout();
    layout.write_block(writer, &rects_payload(&font.recs), options.compress_font_data)?;
    layout.write_block(writer, &glyphs_payload(&font.glyphs), options.compress_font_data)?;

    let font_size = block_len(writer.len() - start)?;
    writer.patch_u32(size_offset, font_size);
    debug!(
        "Embedded font: {} glyphs, {}x{} atlas, {} bytes",
        font.glyph_count(),
        atlas.image.width,
        atlas.image.height,
        font_size
    );
    Ok(())
}

#[inline]
fn write_rect(writer: &mut ByteWriter, rect: &Rectangle) {
    writer.write_f32(rect.x);
    writer.write_f32(rect.y);
    writer.write_f32(rect.width);
    writer.write_f32(rect.height);
}

/// Glyph rectangles as stored on disk: 4 x f32 each.
pub(crate) fn rects_payload(recs: &[Rectangle]) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(recs.len() * 16);
    for rect in recs {
        write_rect(&mut writer, rect);
    }
    writer.into_inner()
}

/// Glyph metrics as stored on disk: 4 x i32 each. The atlas rectangle is
/// not repeated here.
pub(crate) fn glyphs_payload(glyphs: &[GlyphInfo]) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(glyphs.len() * 16);
    for glyph in glyphs {
        writer.write_i32(glyph.value);
        writer.write_i32(glyph.offset_x);
        writer.write_i32(glyph.offset_y);
        writer.write_i32(glyph.advance_x);
    }
    writer.into_inner()
}

/// A font atlas normalized to gray+alpha, with its stored pixel bytes.
pub(crate) struct EncodedAtlas {
    pub image: Image,
    /// DEFLATE stream, or the raw pixels when `compressed` is false
    pub data: Vec<u8>,
    pub compressed: bool,
}

impl EncodedAtlas {
    pub(crate) fn new(atlas: &Image) -> Result<Self> {
        if atlas.format != PixelFormat::GrayAlpha {
            warn!(
                "Font atlas converted from {:?} to GrayAlpha, color information is dropped",
                atlas.format
            );
        }
        let image = atlas.to_gray_alpha()?;

        if compress::is_available() {
            let packed = compress::deflate(&image.data)?;
            // Equal sizes would read back as raw data
            if packed.len() != image.data.len() {
                return Ok(Self {
                    image,
                    data: packed,
                    compressed: true,
                });
            }
            debug!("Compressed atlas is as large as the raw pixels, storing raw");
        }

        let data = image.data.clone();
        Ok(Self {
            image,
            data,
            compressed: false,
        })
    }
}
