//! Bitmap fonts embedded in style files.
//!
//! A [`FontAsset`] is a pre-rasterized font: one atlas [`Image`] holding all
//! glyph bitmaps, the atlas rectangle of every glyph, and per-glyph metrics.
//! The glyph rectangles and the [`GlyphInfo`] array are parallel, matched by
//! index.

pub mod image;

pub use image::{Image, PixelFormat};

use crate::common::error::{Error, Result};

/// Axis-aligned rectangle in atlas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Metrics of one glyph. Its atlas rectangle lives in
/// [`FontAsset::recs`] at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphInfo {
    /// Unicode codepoint
    pub value: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub advance_x: i32,
}

impl GlyphInfo {
    pub const fn new(value: i32, offset_x: i32, offset_y: i32, advance_x: i32) -> Self {
        Self {
            value,
            offset_x,
            offset_y,
            advance_x,
        }
    }
}

/// How the atlas was rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontType {
    /// Plain anti-aliased bitmap
    #[default]
    Normal = 0,
    /// Signed distance field
    Sdf = 1,
}

impl FontType {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Sdf),
            other => Err(Error::Format(format!("Unknown font type: {}", other))),
        }
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Number of glyphs in the toolkit's built-in charset (ASCII 32..=126).
///
/// A font with more glyphs than this uses a custom charset, which text
/// styles have to ship alongside the style file.
pub const BASIC_CHARSET_LEN: usize = 95;

/// A bitmap font ready to be embedded in a style.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAsset {
    /// Size in pixels the font was generated at
    pub base_size: u32,
    pub font_type: FontType,
    pub atlas: Image,
    /// Solid region of the atlas used to draw shapes with the text texture
    pub white_rect: Rectangle,
    /// Atlas rectangle per glyph
    pub recs: Vec<Rectangle>,
    pub glyphs: Vec<GlyphInfo>,
}

impl FontAsset {
    /// Assemble a font, checking that every glyph has a rectangle.
    pub fn new(
        base_size: u32,
        atlas: Image,
        white_rect: Rectangle,
        recs: Vec<Rectangle>,
        glyphs: Vec<GlyphInfo>,
    ) -> Result<Self> {
        if recs.len() != glyphs.len() {
            return Err(Error::Format(format!(
                "Glyph count mismatch: {} rectangles for {} glyphs",
                recs.len(),
                glyphs.len()
            )));
        }
        Ok(Self {
            base_size,
            font_type: FontType::Normal,
            atlas,
            white_rect,
            recs,
            glyphs,
        })
    }

    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the glyph set goes beyond the built-in charset.
    pub fn has_custom_charset(&self) -> bool {
        self.glyph_count() > BASIC_CHARSET_LEN
    }

    /// The font's codepoints as text, in glyph order. Values that are not
    /// valid scalar values are skipped.
    pub fn charset(&self) -> String {
        self.glyphs
            .iter()
            .filter_map(|g| u32::try_from(g.value).ok().and_then(char::from_u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_atlas() -> Image {
        Image::new(2, 1, PixelFormat::GrayAlpha, vec![255, 255, 0, 0]).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_arrays() {
        let result = FontAsset::new(
            10,
            tiny_atlas(),
            Rectangle::default(),
            vec![Rectangle::default()],
            vec![],
        );
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_charset() {
        let glyphs: Vec<_> = "Aé€".chars().map(|c| GlyphInfo::new(c as i32, 0, 0, 5)).collect();
        let recs = vec![Rectangle::default(); glyphs.len()];
        let font = FontAsset::new(10, tiny_atlas(), Rectangle::default(), recs, glyphs).unwrap();
        assert_eq!(font.charset(), "Aé€");
        assert!(!font.has_custom_charset());
        assert_eq!(font.font_type, FontType::Normal);
    }

    #[test]
    fn test_font_type() {
        assert_eq!(FontType::from_raw(0).unwrap(), FontType::Normal);
        assert_eq!(FontType::from_raw(1).unwrap(), FontType::Sdf);
        assert!(FontType::from_raw(2).is_err());
    }
}
