//! rgs-codec - style files for immediate-mode GUI toolkits
//!
//! A style is a table of visual properties per control kind (border colors,
//! padding, text size, ...) plus an optional bitmap font. This library
//! decides which properties are worth saving and reads and writes them in
//! the `.rgs` style file format.
//!
//! # Features
//!
//! - **Change detection**: only properties that differ from a baseline, and
//!   that are not simply inherited from `DEFAULT`, are stored
//! - **Binary format**: versioned, self-contained, with an embedded font
//!   atlas compressed with DEFLATE (`compression` feature, on by default)
//! - **Text format**: a readable line-per-property variant referencing the
//!   font by file name
//! - **Source export**: a C header that embeds the style at compile time
//!
//! # Example - Saving a modified style
//!
//! ```no_run
//! use rgs_codec::rgs::{EncodeOptions, save_binary};
//! use rgs_codec::style::{Control, PropertyTable, count_changes, property};
//!
//! # fn main() -> Result<(), rgs_codec::Error> {
//! let baseline = PropertyTable::raygui_default();
//! let mut current = baseline.clone();
//! current.set(Control::Button.id(), property::BORDER_WIDTH, 3);
//!
//! println!("{} changed properties", count_changes(&current, &baseline));
//! save_binary("my_style.rgs", &current, &baseline, None, &EncodeOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Loading a style
//!
//! ```no_run
//! use rgs_codec::rgs::load_binary;
//! use rgs_codec::style::PropertyTable;
//!
//! # fn main() -> Result<(), rgs_codec::Error> {
//! let decoded = load_binary("my_style.rgs")?;
//!
//! let mut table = PropertyTable::raygui_default();
//! table.load(&decoded.changes);
//! if let Some(font) = decoded.font {
//!     println!("Style font: {} glyphs at {} px", font.glyph_count(), font.base_size);
//! }
//! # Ok(())
//! # }
//! ```

/// Shared binary primitives and the error type
pub mod common;

/// Bitmap font and atlas image types
pub mod font;

/// Style file encoders and decoders
///
/// Binary, text and source representations of a style. See the module
/// documentation for the binary layout.
pub mod rgs;

/// Property table and change detection
pub mod style;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use font::{FontAsset, GlyphInfo, Image, PixelFormat, Rectangle};
pub use rgs::{
    DecodedStyle, EncodeOptions, FormatVersion, TextOptions, decode_binary, decode_text,
    encode_binary, encode_text, export_source,
};
pub use style::{PropertyTable, StyleChange, compute_change_list};
