//! Style export as a C header for compile-time embedding.
//!
//! The header holds the change list as a `GuiStyleProp` array and, with a
//! font, the atlas bytes exactly as the binary encoder stores them plus the
//! glyph arrays. A generated `GuiLoadStyle<Name>()` applies everything at
//! runtime. Export is one-way; there is no parser for the output.

use crate::common::error::Result;
use crate::font::FontAsset;
use crate::style::{PropertyTable, compute_change_list, property_name};
use log::debug;
use std::fmt::Write as FmtWrite;

use super::options::EncodeOptions;
use super::writer::EncodedAtlas;

/// Bytes per line in the atlas data initializer.
const BYTES_PER_LINE: usize = 20;

const BANNER_RULE: &str =
    "//////////////////////////////////////////////////////////////////////////////////\n";
const BANNER_BLANK: &str =
    "//                                                                              //\n";
const BANNER_TITLE: &str =
    "// Style data exported as code                                                  //\n";

/// Identifier spellings derived from a style name.
struct StyleIdents {
    /// `MY_STYLE`
    upper: String,
    /// `myStyle`
    camel: String,
    /// `MyStyle`
    pascal: String,
}

impl StyleIdents {
    fn new(name: &str) -> Self {
        let mut words: Vec<String> = name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
        if words.first().is_none_or(|w| w.starts_with(|c: char| c.is_ascii_digit())) {
            words.insert(0, "style".to_string());
        }

        let capitalize = |w: &String| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        };

        let upper = words
            .iter()
            .map(|w| w.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_");
        let pascal: String = words.iter().map(capitalize).collect();
        let camel = words[0].clone() + &words[1..].iter().map(capitalize).collect::<String>();

        Self {
            upper,
            camel,
            pascal,
        }
    }
}

/// Export the changes of `current` against `baseline`, plus an optional
/// font, as C source.
///
/// `name` becomes part of every generated identifier; any characters that
/// are not ASCII letters or digits separate words.
///
/// # Examples
///
/// ```
/// use rgs_codec::rgs::{EncodeOptions, export_source};
/// use rgs_codec::style::PropertyTable;
///
/// let baseline = PropertyTable::raygui_default();
/// let mut current = baseline.clone();
/// current.set(0, 19, 0x202020ff);
///
/// let source = export_source("dark night", &current, &baseline, None, &EncodeOptions::default())?;
/// assert!(source.contains("#define DARK_NIGHT_STYLE_PROPS_COUNT  1"));
/// assert!(source.contains("{ 0, 19, (int)0x202020ff },    // DEFAULT_BACKGROUND_COLOR"));
/// assert!(source.contains("static void GuiLoadStyleDarkNight(void)"));
/// # Ok::<(), rgs_codec::Error>(())
/// ```
pub fn export_source(
    name: &str,
    current: &PropertyTable,
    baseline: &PropertyTable,
    font: Option<&FontAsset>,
    options: &EncodeOptions,
) -> Result<String> {
    let ids = StyleIdents::new(name);
    let changes = compute_change_list(current, baseline);
    let font = font.filter(|_| options.embed_font);
    let atlas = font.map(|f| EncodedAtlas::new(&f.atlas)).transpose()?;

    let mut out = String::with_capacity(4096);
    // Writing into a String can not fail, results are ignored below

    out.push_str(BANNER_RULE);
    out.push_str(BANNER_BLANK);
    out.push_str(BANNER_TITLE);
    out.push_str(BANNER_BLANK);
    let _ = writeln!(
        out,
        "// USAGE: Call GuiLoadStyle{}() once the GUI is initialized",
        ids.pascal
    );
    out.push_str(BANNER_BLANK);
    out.push_str(BANNER_RULE);
    out.push('\n');

    let _ = writeln!(out, "#define {}_STYLE_PROPS_COUNT  {}", ids.upper, changes.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "// Custom style name: {}", name);
    let _ = writeln!(
        out,
        "static const GuiStyleProp {}StyleProps[{}_STYLE_PROPS_COUNT] = {{",
        ids.camel, ids.upper
    );
    for change in &changes {
        let _ = writeln!(
            out,
            "    {{ {}, {}, (int)0x{:08x} }},    // {}",
            change.control,
            change.property,
            change.value,
            property_name(change.control as usize, change.property as usize)
        );
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);

    if let (Some(font), Some(atlas)) = (font, atlas.as_ref()) {
        write_font_data(&mut out, &ids, font, atlas);
    }

    write_loader(&mut out, &ids, font.zip(atlas.as_ref()));

    debug!(
        "Exported style '{}' as source: {} properties, font: {}",
        name,
        changes.len(),
        font.is_some()
    );
    Ok(out)
}

fn write_font_data(out: &mut String, ids: &StyleIdents, font: &FontAsset, atlas: &EncodedAtlas) {
    let _ = writeln!(
        out,
        "// WARNING: This style uses a custom font ({} px, {} glyphs)",
        font.base_size,
        font.glyph_count()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "#define {}_STYLE_FONT_ATLAS_COMP_SIZE {}", ids.upper, atlas.data.len());
    let _ = writeln!(out);
    if atlas.compressed {
        let _ = writeln!(out, "// Font atlas image pixels data: DEFLATE compressed");
    } else {
        let _ = writeln!(out, "// Font atlas image pixels data: gray+alpha, uncompressed");
    }
    let _ = writeln!(
        out,
        "static unsigned char {}FontData[{}_STYLE_FONT_ATLAS_COMP_SIZE] = {{",
        ids.camel, ids.upper
    );
    for chunk in atlas.data.chunks(BYTES_PER_LINE) {
        out.push_str("   ");
        for byte in chunk {
            let _ = write!(out, " 0x{:02x},", byte);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);

    // C has no zero-length arrays, a font without glyphs gets none
    if font.glyph_count() == 0 {
        return;
    }

    let _ = writeln!(out, "// Font glyphs rectangles data (on atlas)");
    let _ = writeln!(
        out,
        "static const Rectangle {}FontRecs[{}] = {{",
        ids.camel,
        font.glyph_count()
    );
    for rect in &font.recs {
        let _ = writeln!(out, "    {{ {}, {}, {}, {} }},", rect.x, rect.y, rect.width, rect.height);
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);

    let _ = writeln!(out, "// Font glyphs info data");
    let _ = writeln!(out, "// NOTE: No glyphs.image data provided");
    let _ = writeln!(
        out,
        "static const GlyphInfo {}FontGlyphs[{}] = {{",
        ids.camel,
        font.glyph_count()
    );
    for glyph in &font.glyphs {
        let _ = writeln!(
            out,
            "    {{ {}, {}, {}, {}, {{ 0 }}}},",
            glyph.value, glyph.offset_x, glyph.offset_y, glyph.advance_x
        );
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
}

fn write_loader(out: &mut String, ids: &StyleIdents, font: Option<(&FontAsset, &EncodedAtlas)>) {
    let camel = &ids.camel;
    let _ = writeln!(out, "// Style loading function");
    let _ = writeln!(out, "static void GuiLoadStyle{}(void)", ids.pascal);
    let _ = writeln!(out, "{{");
    let _ = writeln!(out, "    // Load style properties provided");
    let _ = writeln!(out, "    // NOTE: Default properties are propagated");
    let _ = writeln!(out, "    for (int i = 0; i < {}_STYLE_PROPS_COUNT; i++)", ids.upper);
    let _ = writeln!(out, "    {{");
    let _ = writeln!(
        out,
        "        GuiSetStyle({c}StyleProps[i].controlId, {c}StyleProps[i].propertyId, {c}StyleProps[i].propertyValue);",
        c = camel
    );
    let _ = writeln!(out, "    }}");

    if let Some((font, atlas)) = font {
        let _ = writeln!(out);
        let _ = writeln!(out, "    // Custom font loading");
        if atlas.compressed {
            let _ = writeln!(
                out,
                "    // NOTE: Compressed font image data (DEFLATE), it requires DecompressData() function"
            );
            let _ = writeln!(out, "    int {}FontDataSize = 0;", camel);
            let _ = writeln!(
                out,
                "    unsigned char *data = DecompressData({c}FontData, {u}_STYLE_FONT_ATLAS_COMP_SIZE, &{c}FontDataSize);",
                c = camel,
                u = ids.upper
            );
            let _ = writeln!(
                out,
                "    Image imFont = {{ data, {}, {}, 1, {} }};",
                atlas.image.width,
                atlas.image.height,
                atlas.image.format.as_raw()
            );
        } else {
            let _ = writeln!(
                out,
                "    Image imFont = {{ {}FontData, {}, {}, 1, {} }};",
                camel,
                atlas.image.width,
                atlas.image.height,
                atlas.image.format.as_raw()
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "    Font font = {{ 0 }};");
        let _ = writeln!(out, "    font.baseSize = {};", font.base_size);
        let _ = writeln!(out, "    font.glyphCount = {};", font.glyph_count());
        let _ = writeln!(out);
        let _ = writeln!(out, "    // Load texture from image");
        let _ = writeln!(out, "    font.texture = LoadTextureFromImage(imFont);");
        if atlas.compressed {
            let _ = writeln!(
                out,
                "    UnloadImage(imFont);  // Uncompressed image data can be unloaded from memory"
            );
        }
        if font.glyph_count() > 0 {
            out.push('\n');
            out.push_str("    // Copy glyph recs and info so the font can be unloaded safely\n");
            out.push_str(
                "    font.recs = (Rectangle *)RL_MALLOC(font.glyphCount*sizeof(Rectangle));\n",
            );
            let _ = writeln!(
                out,
                "    memcpy(font.recs, {}FontRecs, font.glyphCount*sizeof(Rectangle));",
                camel
            );
            out.push_str(
                "    font.glyphs = (GlyphInfo *)RL_MALLOC(font.glyphCount*sizeof(GlyphInfo));\n",
            );
            let _ = writeln!(
                out,
                "    memcpy(font.glyphs, {}FontGlyphs, font.glyphCount*sizeof(GlyphInfo));",
                camel
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "    GuiSetFont(font);");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "    // Setup a white rectangle on the font to be used on shapes drawing,"
        );
        let _ = writeln!(
            out,
            "    // it makes possible to draw shapes and text (full UI) in a single draw call"
        );
        let rect = font.white_rect;
        let _ = writeln!(
            out,
            "    Rectangle fontWhiteRec = {{ {}, {}, {}, {} }};",
            rect.x, rect.y, rect.width, rect.height
        );
        let _ = writeln!(out, "    SetShapesTexture(font.texture, fontWhiteRec);");
    }

    let _ = writeln!(out, "}}");
}
