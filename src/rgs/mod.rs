//! Style file codec (`.rgs`).
//!
//! A style file stores the properties that differ from a baseline table
//! (see [`crate::style::compute_change_list`]) and, optionally, a bitmap font
//! to draw the controls with. Three representations are supported:
//!
//! - **binary**: [`encode_binary`] / [`decode_binary`]. Self-contained, the
//!   font atlas and glyph data are embedded, DEFLATE-compressed when the
//!   `compression` feature is enabled.
//! - **text**: [`encode_text`] / [`decode_text`]. Human-readable, the font
//!   is referenced by file name only.
//! - **source**: [`export_source`]. A C header embedding the style at
//!   compile time, no decoder.
//!
//! # Binary layout
//!
//! All integers are little-endian; a rectangle is four `f32`.
//!
//! | Size | Field |
//! |------|-------|
//! | 4 | signature `"rGS "` |
//! | 2 | version (400) |
//! | 2 | reserved |
//! | 4 | property count N |
//! | 8×N | control `u16`, property `u16`, value `u32` |
//! | 4 | font data size, 0 ends the file |
//! | 28 | base size, glyph count, font type, white rectangle |
//! | 20 + n | atlas: raw size, stored size, width, height, pixel format, pixels |
//! | 4 + n | glyph rectangles: compressed size (0 = raw), data |
//! | 4 + n | glyph info: compressed size (0 = raw), data |
//!
//! Version 300 files lack the two compressed-size fields and always store
//! the glyph blocks raw.
//!
//! # Example
//!
//! ```
//! use rgs_codec::rgs::{EncodeOptions, decode_binary, encode_binary};
//! use rgs_codec::style::{PropertyTable, property};
//!
//! let baseline = PropertyTable::raygui_default();
//! let mut current = baseline.clone();
//! current.set(0, property::BACKGROUND_COLOR, 0x1e1e1eff);
//!
//! let bytes = encode_binary(&current, &baseline, None, &EncodeOptions::default())?;
//!
//! let mut loaded = PropertyTable::raygui_default();
//! loaded.load(&decode_binary(&bytes)?.changes);
//! assert_eq!(loaded, current);
//! # Ok::<(), rgs_codec::Error>(())
//! ```

// Submodule declarations
pub mod compress;
pub mod export;
pub mod options;
pub mod reader;
pub mod text;
pub mod version;
pub mod writer;

// Re-exports for convenience
pub use export::export_source;
pub use options::{EncodeOptions, TextOptions};
pub use reader::{DecodedStyle, decode_binary, decode_binary_into};
pub use text::{FontReference, TextStyle, TextStyleFile, decode_text, encode_text};
pub use version::FormatVersion;
pub use writer::encode_binary;

use crate::common::error::Result;
use crate::font::FontAsset;
use crate::style::PropertyTable;
use log::debug;
use std::path::Path;

/// File signature of binary styles.
pub const MAGIC: &[u8; 4] = b"rGS ";

/// Encode a binary style and write it to `path`.
pub fn save_binary<P: AsRef<Path>>(
    path: P,
    current: &PropertyTable,
    baseline: &PropertyTable,
    font: Option<&FontAsset>,
    options: &EncodeOptions,
) -> Result<()> {
    let bytes = encode_binary(current, baseline, font, options)?;
    std::fs::write(path.as_ref(), &bytes)?;
    debug!("Saved {} byte style to {}", bytes.len(), path.as_ref().display());
    Ok(())
}

/// Read and decode the binary style at `path`.
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<DecodedStyle> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!("Loading {} byte style from {}", bytes.len(), path.as_ref().display());
    decode_binary(&bytes)
}

/// Encode a text style and write it to `path`.
///
/// A custom charset is written next to it, under
/// [`TextOptions::charset_file`] in the same directory.
pub fn save_text<P: AsRef<Path>>(
    path: P,
    current: &PropertyTable,
    baseline: &PropertyTable,
    font: Option<&FontAsset>,
    options: &TextOptions,
) -> Result<()> {
    let path = path.as_ref();
    let style = encode_text(current, baseline, font, options);
    std::fs::write(path, style.text.as_bytes())?;

    if let Some(charset) = style.charset {
        let charset_path = path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&options.charset_file);
        std::fs::write(&charset_path, charset.as_bytes())?;
        debug!("Saved charset sidecar to {}", charset_path.display());
    }
    Ok(())
}

/// Read and parse the text style at `path`.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<TextStyleFile> {
    let source = std::fs::read_to_string(path.as_ref())?;
    decode_text(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use crate::font::{GlyphInfo, Image, PixelFormat, Rectangle};

    #[test]
    fn test_binary_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.rgs");

        let baseline = PropertyTable::raygui_default();
        let mut current = baseline.clone();
        current.set(3, 1, 0x336699ff);
        save_binary(&path, &current, &baseline, None, &EncodeOptions::default()).unwrap();

        let decoded = load_binary(&path).unwrap();
        assert_eq!(decoded.version, 400);
        let mut table = baseline.clone();
        table.apply(&decoded.changes);
        assert_eq!(table, current);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_binary(dir.path().join("missing.rgs"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_text_file_with_charset_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.txt.rgs");

        let count = 100;
        let atlas = Image::new(1, 1, PixelFormat::GrayAlpha, vec![255, 255]).unwrap();
        let glyphs: Vec<_> = (0..count).map(|i| GlyphInfo::new(0x400 + i, 0, 0, 7)).collect();
        let font = FontAsset::new(
            12,
            atlas,
            Rectangle::default(),
            vec![Rectangle::default(); count as usize],
            glyphs,
        )
        .unwrap();

        let baseline = PropertyTable::raygui_default();
        let options = TextOptions::new().with_charset_file("cyrillic.txt");
        save_text(&path, &baseline, &baseline, Some(&font), &options).unwrap();

        let sidecar = std::fs::read_to_string(dir.path().join("cyrillic.txt")).unwrap();
        assert_eq!(sidecar, font.charset());

        let parsed = load_text(&path).unwrap();
        assert!(parsed.changes.is_empty());
        let reference = parsed.font.unwrap();
        assert_eq!(reference.size, 12);
        assert_eq!(reference.charset_file.as_deref(), Some("cyrillic.txt"));
    }
}
