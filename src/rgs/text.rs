//! Line-oriented text styles.
//!
//! A text style lists one directive per line:
//!
//! ```text
//! f <size> <charsetFile> <fontFile>
//! p <control> <property> 0x<value> <NAME>
//! ```
//!
//! Lines starting with `#` are comments. The font is only referenced by file
//! name: text styles carry no atlas or glyph data and are not
//! self-contained, which is why the binary format exists.

use crate::common::error::{Error, Result};
use crate::font::FontAsset;
use crate::style::{PropertyTable, StyleChange, changes, property_name};
use log::debug;
use std::fmt::{self, Write as FmtWrite};
use std::str::{FromStr, SplitWhitespace};

use super::options::TextOptions;

/// Charset file name written when the font uses the built-in charset.
const NO_CHARSET: &str = "0";

/// Output of [`encode_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// The style file contents
    pub text: String,
    /// UTF-8 codepoint list to save as [`TextOptions::charset_file`], set
    /// when the font goes beyond the built-in charset
    pub charset: Option<String>,
}

/// Font referenced by an `f` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontReference {
    /// Size the font is generated at
    pub size: u32,
    /// Charset sidecar file, `None` for the built-in charset
    pub charset_file: Option<String>,
    pub font_file: String,
}

/// Output of [`decode_text`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextStyleFile {
    pub changes: Vec<StyleChange>,
    pub font: Option<FontReference>,
}

/// Encode the changes of `current` against `baseline` as a text style.
///
/// Properties appear in the same order as in binary files. Ids are written
/// as two-digit decimals and values as eight hex digits, each followed by
/// the property name.
///
/// # Examples
///
/// ```
/// use rgs_codec::rgs::{TextOptions, encode_text};
/// use rgs_codec::style::PropertyTable;
///
/// let baseline = PropertyTable::new();
/// let mut current = baseline.clone();
/// current.set(0, 1, 0xFF00FF00);
///
/// let style = encode_text(&current, &baseline, None, &TextOptions::default());
/// assert!(style.text.contains("p 00 01 0xff00ff00    DEFAULT_BASE_COLOR_NORMAL\n"));
/// assert!(style.charset.is_none());
/// ```
pub fn encode_text(
    current: &PropertyTable,
    baseline: &PropertyTable,
    font: Option<&FontAsset>,
    options: &TextOptions,
) -> TextStyle {
    let font = font.filter(|_| options.embed_font);
    let custom_charset = font.is_some_and(FontAsset::has_custom_charset);

    let mut text = String::with_capacity(1024);
    text.push_str("#\n");
    text.push_str("# rgs style text file (v4.0)\n");
    text.push_str("#\n");
    text.push_str("# Provided info:\n");
    text.push_str("#   f <gen_font_size> <charset_file> <font_file>\n");
    text.push_str("#   p <control_id> <property_id> <property_value> <property_name>\n");
    text.push_str("#\n");

    let charset = font.and_then(|font| {
        if custom_charset {
            text.push_str(
                "# WARNING: This style uses a custom font and charset, both must be provided with the style file\n",
            );
        } else {
            text.push_str(
                "# WARNING: This style uses a custom font, it must be provided with the style file\n",
            );
        }
        text.push_str("#\n");

        let charset_file = if custom_charset {
            file_token(&options.charset_file)
        } else {
            NO_CHARSET.to_string()
        };
        // Writing into a String can not fail
        let _ = writeln!(
            text,
            "f {} {} {}",
            font.base_size,
            charset_file,
            file_token(&options.font_file)
        );

        custom_charset.then(|| font.charset())
    });

    let mut count = 0usize;
    for change in changes(current, baseline) {
        let _ = writeln!(
            text,
            "p {:02} {:02} 0x{:08x}    {}",
            change.control,
            change.property,
            change.value,
            property_name(change.control as usize, change.property as usize)
        );
        count += 1;
    }
    debug!("Encoded text style: {} properties, font: {}", count, font.is_some());

    TextStyle { text, charset }
}

/// File names can not contain whitespace in a directive.
fn file_token(name: &str) -> String {
    let token: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if token.is_empty() { NO_CHARSET.to_string() } else { token }
}

/// Parse a text style.
///
/// Blank lines and `#` comments are skipped. Anything after the value of a
/// `p` directive is a free-form comment. A second `f` directive, an unknown
/// directive, a malformed number or an out-of-range property slot is an
/// [`Error::Format`] naming the line.
pub fn decode_text(source: &str) -> Result<TextStyleFile> {
    let mut style = TextStyleFile::default();

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = Fields::new(line, index + 1);
        match fields.tokens.next() {
            Some("p") => {
                let control: u16 = fields.number("control id")?;
                let property: u16 = fields.number("property id")?;
                let value = fields.parse("property value", parse_hex)?;
                if !PropertyTable::contains(control as usize, property as usize) {
                    return Err(fields.error(format_args!(
                        "property slot out of range: control {}, property {}",
                        control, property
                    )));
                }
                style.changes.push(StyleChange::new(control, property, value));
            },
            Some("f") => {
                if style.font.is_some() {
                    return Err(fields.error(format_args!("duplicate font directive")));
                }
                let size: u32 = fields.number("font size")?;
                let charset_file = fields.name("charset file")?;
                let font_file = fields.name("font file")?;
                style.font = Some(FontReference {
                    size,
                    charset_file: (charset_file != NO_CHARSET).then_some(charset_file),
                    font_file,
                });
            },
            Some(other) => {
                return Err(fields.error(format_args!("unknown directive '{}'", other)));
            },
            None => {},
        }
    }

    debug!("Decoded text style: {} properties", style.changes.len());
    Ok(style)
}

/// Remaining tokens of one directive line.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    line_no: usize,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str, line_no: usize) -> Self {
        Self {
            tokens: line.split_whitespace(),
            line_no,
        }
    }

    fn error(&self, message: fmt::Arguments<'_>) -> Error {
        Error::Format(format!("line {}: {}", self.line_no, message))
    }

    fn parse<T>(&mut self, what: &str, parse: impl FnOnce(&str) -> Option<T>) -> Result<T> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| self.error(format_args!("missing {}", what)))?;
        parse(token).ok_or_else(|| self.error(format_args!("invalid {} '{}'", what, token)))
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        self.parse(what, |s| s.parse().ok())
    }

    fn name(&mut self, what: &str) -> Result<String> {
        self.parse(what, |s| Some(s.to_string()))
    }
}

fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{GlyphInfo, Image, PixelFormat, Rectangle};
    use crate::style::compute_change_list;

    fn font_with_glyphs(count: usize) -> FontAsset {
        let atlas = Image::new(1, 1, PixelFormat::GrayAlpha, vec![255, 255]).unwrap();
        let glyphs: Vec<_> = (0..count)
            .map(|i| GlyphInfo::new(32 + i as i32, 0, 0, 6))
            .collect();
        let recs = vec![Rectangle::default(); count];
        FontAsset::new(18, atlas, Rectangle::default(), recs, glyphs).unwrap()
    }

    fn sample_tables() -> (PropertyTable, PropertyTable) {
        let baseline = PropertyTable::raygui_default();
        let mut current = baseline.clone();
        current.set(0, 2, 0x00000000);
        current.set(4, 16, 20);
        current.set(15, 13, 12);
        (current, baseline)
    }

    #[test]
    fn test_property_lines_in_engine_order() {
        let (current, baseline) = sample_tables();
        let style = encode_text(&current, &baseline, None, &TextOptions::default());
        let lines: Vec<_> = style.text.lines().filter(|l| l.starts_with("p ")).collect();
        assert_eq!(
            lines,
            vec![
                "p 00 02 0x00000000    DEFAULT_TEXT_COLOR_NORMAL",
                "p 04 16 0x00000014    SLIDER_SLIDER_WIDTH",
                "p 15 13 0x0000000c    STATUSBAR_TEXT_PADDING",
            ]
        );
        assert!(!style.text.contains("\nf "));
    }

    #[test]
    fn test_font_directive_basic_charset() {
        let (current, baseline) = sample_tables();
        let font = font_with_glyphs(95);
        let options = TextOptions::new().with_font_file("my font.ttf");
        let style = encode_text(&current, &baseline, Some(&font), &options);
        assert!(style.text.contains("\nf 18 0 my_font.ttf\n"));
        assert!(style.charset.is_none());
    }

    #[test]
    fn test_custom_charset_sidecar() {
        let (current, baseline) = sample_tables();
        let font = font_with_glyphs(96);
        let options = TextOptions::new().with_charset_file("glyphs.txt");
        let style = encode_text(&current, &baseline, Some(&font), &options);
        assert!(style.text.contains("\nf 18 glyphs.txt font.ttf\n"));
        let charset = style.charset.unwrap();
        assert_eq!(charset.chars().count(), 96);
        assert!(charset.starts_with(" !\"#"));
    }

    #[test]
    fn test_font_skipped_when_not_embedded() {
        let (current, baseline) = sample_tables();
        let font = font_with_glyphs(200);
        let options = TextOptions::new().with_embed_font(false);
        let style = encode_text(&current, &baseline, Some(&font), &options);
        assert!(!style.text.contains("\nf "));
        assert!(style.charset.is_none());
    }

    #[test]
    fn test_decode_encoded_text() {
        let (current, baseline) = sample_tables();
        let font = font_with_glyphs(10);
        let style = encode_text(&current, &baseline, Some(&font), &TextOptions::default());

        let parsed = decode_text(&style.text).unwrap();
        assert_eq!(parsed.changes, compute_change_list(&current, &baseline));
        assert_eq!(
            parsed.font,
            Some(FontReference {
                size: 18,
                charset_file: None,
                font_file: "font.ttf".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_errors_name_the_line() {
        let err = decode_text("# header\np 00 01 0xZZ\n").unwrap_err();
        assert!(matches!(err, Error::Format(ref msg) if msg.starts_with("line 2")));

        assert!(decode_text("p 16 00 0x0\n").is_err());
        assert!(decode_text("p 00\n").is_err());
        assert!(decode_text("x 1 2 3\n").is_err());
        assert!(decode_text("f 10 0 a.ttf\nf 12 0 b.ttf\n").is_err());
    }

    #[test]
    fn test_decode_accepts_bare_hex_and_blank_lines() {
        let parsed = decode_text("\n  p 01 14 00000002 LABEL_TEXT_ALIGNMENT  \n\n").unwrap();
        assert_eq!(parsed.changes, vec![StyleChange::new(1, 14, 2)]);
        assert!(parsed.font.is_none());
    }
}
