//! Resolved geometry: rectangles, extents and edge insets.
//!
//! Every value here is in device pixels at the environment's resolution,
//! with the origin at the top-left corner of the page and y growing down.

use serde::{Deserialize, Serialize};

/// A width/height pair in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Extent {
    /// The empty extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create an extent from a width and a height.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Extent {
        Extent {
            width: self.width,
            height: self.height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink the rectangle by the given edge sizes.
    ///
    /// ```text
    /// x = x + left
    /// y = y + top
    /// width = width - left - right
    /// height = height - top - bottom
    /// ```
    ///
    /// The result is not clamped: over-sized insets produce a negative size.
    #[must_use]
    pub fn inset(&self, edges: EdgeSizes) -> Self {
        Self {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: self.width - edges.left - edges.right,
            height: self.height - edges.top - edges.bottom,
        }
    }
}

/// Edge sizes for padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}
