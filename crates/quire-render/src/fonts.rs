//! System font discovery and fontdue-backed metrics.

use fontdue::{Font, FontSettings};
use quire_common::warning::warn_once;
use quire_layout::{ApproximateFontMetrics, FontFace, FontMetrics};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// The four faces of one font family. Missing faces fall back to the
/// closest available one.
#[derive(Default)]
pub struct FontSet {
    regular: Option<Font>,
    bold: Option<Font>,
    italic: Option<Font>,
    bold_italic: Option<Font>,
}

impl FontSet {
    /// A set with no fonts; text is measured approximately and not rasterized.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Search the usual system locations for a sans-serif family.
    #[must_use]
    pub fn load_system() -> Self {
        let set = Self {
            regular: load_font_from_paths(FONT_SEARCH_PATHS, "regular"),
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS, "bold"),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS, "italic"),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS, "bold-italic"),
        };
        if set.regular.is_none() {
            let _ = warn_once(
                "fonts",
                &format!(
                    "no system font found in {} locations; text will be measured approximately and not rasterized",
                    FONT_SEARCH_PATHS.len()
                ),
            );
        }
        set
    }

    /// Like [`FontSet::load_system`], but only faces whose advance widths
    /// match the standard Helvetica family (Helvetica, Arial, Liberation Sans).
    ///
    /// PDF output draws with the standard Helvetica fonts, so text laid out
    /// for PDF is measured with these faces. An empty set measures
    /// approximately.
    #[must_use]
    pub fn load_helvetica_compatible() -> Self {
        let load = |paths: &[&str], label: &str| {
            let compatible: Vec<&str> = paths
                .iter()
                .copied()
                .filter(|path| is_helvetica_compatible(path))
                .collect();
            load_font_from_paths(&compatible, label)
        };
        let set = Self {
            regular: load(FONT_SEARCH_PATHS, "regular"),
            bold: load(FONT_BOLD_SEARCH_PATHS, "bold"),
            italic: load(FONT_ITALIC_SEARCH_PATHS, "italic"),
            bold_italic: load(FONT_BOLD_ITALIC_SEARCH_PATHS, "bold-italic"),
        };
        if !set.has_fonts() {
            log::info!(
                target: "quire::fonts",
                "no Helvetica-compatible font found; measuring text approximately"
            );
        }
        set
    }

    /// Whether at least the regular face is available.
    #[must_use]
    pub const fn has_fonts(&self) -> bool {
        self.regular.is_some()
    }

    /// Select the best available font for a face, falling back through:
    /// exact match → partial match → regular.
    #[must_use]
    pub fn face(&self, face: FontFace) -> Option<&Font> {
        match face {
            FontFace::BoldItalic => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.regular.as_ref()),
            FontFace::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontFace::Italic => self.italic.as_ref().or(self.regular.as_ref()),
            FontFace::Regular => self.regular.as_ref(),
        }
    }
}

/// Helvetica, Arial and Liberation Sans share advance widths.
fn is_helvetica_compatible(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    ["helvetica", "arial", "liberationsans"]
        .iter()
        .any(|family| path.contains(family))
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str], label: &str) -> Option<Font> {
    for path in paths {
        if let Ok(data) = std::fs::read(path)
            && let Ok(font) = Font::from_bytes(data, FontSettings::default())
        {
            log::debug!(target: "quire::fonts", "loaded {label} font: {path}");
            return Some(font);
        }
    }
    None
}

/// Font metrics backed by fontdue's per-glyph metrics.
///
/// Advance widths match the cursor advancement of the raster encoder.
/// Faces without a loaded font are measured with [`ApproximateFontMetrics`].
pub struct FontdueFontMetrics<'a> {
    fonts: &'a FontSet,
}

impl<'a> FontdueFontMetrics<'a> {
    /// Create a new font metrics provider over a font set.
    #[must_use]
    pub const fn new(fonts: &'a FontSet) -> Self {
        Self { fonts }
    }
}

impl FontMetrics for FontdueFontMetrics<'_> {
    fn text_width(&self, text: &str, font_size: f32, face: FontFace) -> f32 {
        let Some(font) = self.fonts.face(face) else {
            return ApproximateFontMetrics.text_width(text, font_size, face);
        };
        // Font::metrics() avoids generating bitmaps when only measurements are needed.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn line_height(&self, font_size: f32) -> f32 {
        ApproximateFontMetrics.line_height(font_size)
    }

    fn ascent(&self, font_size: f32) -> f32 {
        self.fonts
            .face(FontFace::Regular)
            .and_then(|font| font.horizontal_line_metrics(font_size))
            .map_or_else(
                || ApproximateFontMetrics.ascent(font_size),
                |metrics| metrics.ascent,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_compatible_paths() {
        assert!(is_helvetica_compatible("/System/Library/Fonts/Helvetica.ttc"));
        assert!(is_helvetica_compatible("C:\\Windows\\Fonts\\arialbd.ttf"));
        assert!(is_helvetica_compatible(
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"
        ));
        assert!(!is_helvetica_compatible("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        assert!(!is_helvetica_compatible(
            "/usr/share/fonts/truetype/freefont/FreeSans.ttf"
        ));
    }

    #[test]
    fn test_empty_set_measures_approximately() {
        let fonts = FontSet::empty();
        assert!(!fonts.has_fonts());
        assert!(fonts.face(FontFace::Bold).is_none());

        let metrics = FontdueFontMetrics::new(&fonts);
        assert_eq!(
            metrics.text_width("abc", 10.0, FontFace::Regular),
            ApproximateFontMetrics.text_width("abc", 10.0, FontFace::Regular)
        );
    }
}
