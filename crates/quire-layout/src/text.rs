//! Text leaves and the font-metrics seam.
//!
//! A [`TextBox`] draws one run of text inside its content rectangle. The
//! run is either plain text with a single [`TextStyle`], or a
//! [`StyledText`] made of spans that each carry their own font and color.
//! Measurement goes through the [`FontMetrics`] trait so the core never
//! touches font data itself.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::dimension::Unit;
use crate::geometry::{Extent, Rect};

/// Font metrics interface for text measurement.
///
/// Implementors provide per-glyph advance widths and line metrics. All
/// sizes are in device pixels at the environment's resolution.
pub trait FontMetrics {
    /// Total advance width of `text` at the given font size and face.
    ///
    /// This should match the cursor advancement used when drawing.
    fn text_width(&self, text: &str, font_size: f32, face: FontFace) -> f32;

    /// Height of one line of text at the given font size.
    fn line_height(&self, font_size: f32) -> f32;

    /// Distance from the top of a line to its baseline.
    fn ascent(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance width of Latin glyphs in a proportional font is
/// approximately 0.6× the font size (typical for Helvetica/Arial body
/// text). Line height uses 1.2× the font size.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_size: f32, _face: FontFace) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().filter(|ch| !ch.is_control()).count() as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }

    fn ascent(&self, font_size: f32) -> f32 {
        font_size
    }
}

/// Weight and slant of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    /// Upright, normal weight.
    #[default]
    Regular,
    /// Upright, bold.
    Bold,
    /// Slanted, normal weight.
    Italic,
    /// Slanted, bold.
    BoldItalic,
}

impl FontFace {
    /// Whether the face is bold.
    #[must_use]
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Whether the face is slanted.
    #[must_use]
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// A font request: a physical size and a face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Em size.
    pub size: Unit,
    /// Weight and slant.
    pub face: FontFace,
}

impl Font {
    /// Default body font size, in points.
    pub const DEFAULT_POINT_SIZE: f32 = 12.0;

    /// A regular font of the given size.
    #[must_use]
    pub const fn new(size: Unit) -> Self {
        Self {
            size,
            face: FontFace::Regular,
        }
    }

    /// The same size with another face.
    #[must_use]
    pub const fn with_face(self, face: FontFace) -> Self {
        Self { face, ..self }
    }

    /// Em size in device pixels.
    #[must_use]
    pub fn pixel_size(&self, dpi: f32) -> f32 {
        self.size.pixels(dpi)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Unit::point(Self::DEFAULT_POINT_SIZE))
    }
}

/// Horizontal placement of each line within the text rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush against the leading edge of the writing direction.
    #[default]
    Natural,
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// What happens to a line that does not fit the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreakMode {
    /// Drop the glyphs that do not fit.
    Clip,
    /// Replace the start of the line with an ellipsis.
    TruncateHead,
    /// Replace the end of the line with an ellipsis.
    #[default]
    TruncateTail,
    /// Replace the middle of the line with an ellipsis.
    TruncateMiddle,
    /// Wrap at whitespace onto further lines.
    WordWrap,
}

/// Style shared by every character of a plain text run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font of the run.
    pub font: Font,
    /// Text color; black when unset.
    pub color: Option<Color>,
    /// Horizontal alignment.
    pub alignment: TextAlign,
    /// Overflow policy.
    pub line_break: LineBreakMode,
}

/// A span of text with its own font and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The characters of the span.
    pub text: String,
    /// Font of the span.
    #[serde(default)]
    pub font: Font,
    /// Color of the span.
    #[serde(default)]
    pub color: Color,
}

impl TextSpan {
    /// A span in the default font and color.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            color: Color::BLACK,
        }
    }
}

/// A pre-styled run: spans plus paragraph attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyledText {
    /// Spans in reading order.
    pub spans: Vec<TextSpan>,
    /// Horizontal alignment.
    #[serde(default)]
    pub alignment: TextAlign,
    /// Overflow policy.
    #[serde(default)]
    pub line_break: LineBreakMode,
}

impl StyledText {
    /// A run made of the given spans with default paragraph attributes.
    #[must_use]
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self {
            spans,
            ..Self::default()
        }
    }
}

/// What a text box draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextContent {
    /// One string with one style.
    Plain {
        /// The characters to draw.
        text: String,
        /// Style of every character.
        #[serde(default)]
        style: TextStyle,
    },
    /// A run of individually styled spans.
    Styled(StyledText),
}

impl TextContent {
    /// Plain text in the default style.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// The content as styled spans.
    #[must_use]
    pub fn to_styled(&self) -> Cow<'_, StyledText> {
        match self {
            Self::Plain { text, style } => Cow::Owned(StyledText {
                spans: vec![TextSpan {
                    text: text.clone(),
                    font: style.font,
                    color: style.color.unwrap_or(Color::BLACK),
                }],
                alignment: style.alignment,
                line_break: style.line_break,
            }),
            Self::Styled(styled) => Cow::Borrowed(styled),
        }
    }
}

/// Vertical placement of the text within a taller content rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    /// Flush against the top.
    Top,
    /// Centered.
    #[default]
    Middle,
    /// Flush against the bottom.
    Bottom,
}

/// A leaf box that draws a single run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// The run to draw.
    pub content: TextContent,
    /// Placement within the content rectangle.
    pub vertical_alignment: VerticalAlignment,
}

impl TextBox {
    /// A text box with middle vertical alignment.
    #[must_use]
    pub const fn new(content: TextContent) -> Self {
        Self {
            content,
            vertical_alignment: VerticalAlignment::Middle,
        }
    }

    /// Plain text in the default style.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(TextContent::plain(text))
    }

    /// Plain text with an explicit style.
    #[must_use]
    pub fn with_style(text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(TextContent::Plain {
            text: text.into(),
            style,
        })
    }

    /// Set the vertical alignment.
    #[must_use]
    pub fn aligned(mut self, vertical_alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = vertical_alignment;
        self
    }

    /// The rectangle the text is drawn into, given the content rectangle
    /// and the text's natural size.
    ///
    /// Text at least as tall as the content rectangle fills it entirely.
    /// Shorter text keeps its natural height, spans the full content
    /// width, and is placed per the vertical alignment.
    #[must_use]
    pub fn text_rect(&self, content: Rect, natural: Extent) -> Rect {
        if natural.height >= content.height {
            return content;
        }
        let slack = content.height - natural.height;
        let y = match self.vertical_alignment {
            VerticalAlignment::Top => content.y,
            VerticalAlignment::Middle => content.y + slack / 2.0,
            VerticalAlignment::Bottom => content.y + slack,
        };
        Rect::new(content.x, y, content.width, natural.height)
    }
}
