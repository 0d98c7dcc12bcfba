//! Configuration for the style encoders.

use super::version::FormatVersion;

/// Options for [`encode_binary`](super::encode_binary) and
/// [`export_source`](super::export_source).
///
/// # Examples
///
/// ```rust
/// use rgs_codec::rgs::{EncodeOptions, FormatVersion};
///
/// // Current format, font embedded, glyph data compressed
/// let options = EncodeOptions::default();
///
/// // Legacy layout without the font
/// let options = EncodeOptions::new()
///     .with_version(FormatVersion::V300)
///     .with_embed_font(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Whether to embed the font when one is given
    pub embed_font: bool,
    /// Whether to compress the glyph rectangle and glyph info blocks.
    ///
    /// The atlas image is compressed whenever compression is available;
    /// this flag only covers the glyph blocks and has no effect on the
    /// legacy layout, which can not flag compressed blocks.
    pub compress_font_data: bool,
    /// Format revision to write
    pub version: FormatVersion,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            embed_font: true,
            compress_font_data: true,
            version: FormatVersion::CURRENT,
        }
    }
}

impl EncodeOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_embed_font(mut self, embed: bool) -> Self {
        self.embed_font = embed;
        self
    }

    #[inline]
    pub fn with_compress_font_data(mut self, compress: bool) -> Self {
        self.compress_font_data = compress;
        self
    }

    #[inline]
    pub fn with_version(mut self, version: FormatVersion) -> Self {
        self.version = version;
        self
    }
}

/// Options for [`encode_text`](super::encode_text).
///
/// Text styles never contain font pixels. They reference the font file by
/// name, and a custom charset by the name of a sidecar file, so both names
/// have to match the files the caller ships with the style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Whether to write the `f` directive when a font is given
    pub embed_font: bool,
    /// Font file name recorded in the `f` directive
    pub font_file: String,
    /// Charset sidecar file name, used for fonts with a custom charset
    pub charset_file: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            embed_font: true,
            font_file: "font.ttf".to_string(),
            charset_file: "charset.txt".to_string(),
        }
    }
}

impl TextOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_embed_font(mut self, embed: bool) -> Self {
        self.embed_font = embed;
        self
    }

    /// Set the font file name. Whitespace is not allowed in the text format
    /// and is replaced with underscores when the directive is written.
    #[inline]
    pub fn with_font_file(mut self, name: impl Into<String>) -> Self {
        self.font_file = name.into();
        self
    }

    #[inline]
    pub fn with_charset_file(mut self, name: impl Into<String>) -> Self {
        self.charset_file = name.into();
        self
    }
}
