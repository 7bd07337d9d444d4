//! Display List - a sequence of drawing commands for one page
//!
//! Coordinates are device pixels at the environment resolution, origin at
//! the top-left corner of the page, y growing down.

use serde::Serialize;

use crate::color::Color;
use crate::geometry::Rect;
use crate::text::FontFace;

/// A single drawing command.
///
/// Commands are added to the display list in painting order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    ///
    /// Used for the fill color of a stack child.
    FillRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Fill color.
        color: Color,
    },

    /// Stroke the outline of a rectangle.
    ///
    /// The stroke is centered on the rectangle's edges.
    StrokeRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Stroke color.
        color: Color,
        /// Line width in pixels.
        line_width: f32,
    },

    /// Draw a run of glyphs in one font and color.
    DrawText {
        /// X coordinate of the first glyph's origin.
        x: f32,
        /// Y coordinate of the baseline.
        baseline: f32,
        /// The characters to draw.
        text: String,
        /// Font size in pixels.
        font_size: f32,
        /// Weight and slant.
        face: FontFace,
        /// Text color.
        color: Color,
    },
}

impl DisplayCommand {
    /// A fill covering `rect`.
    #[must_use]
    pub const fn fill(rect: Rect, color: Color) -> Self {
        Self::FillRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color,
        }
    }

    /// An outline of `rect`.
    #[must_use]
    pub const fn stroke(rect: Rect, color: Color, line_width: f32) -> Self {
        Self::StrokeRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color,
            line_width,
        }
    }
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Extend<DisplayCommand> for DisplayList {
    fn extend<I: IntoIterator<Item = DisplayCommand>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}
