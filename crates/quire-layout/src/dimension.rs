//! Measurement model: physical units, sizing instructions and box sizes.
//!
//! A [`Unit`] is a physical length that converts to device pixels at any
//! output resolution. A [`Length`] is a one-dimensional sizing instruction
//! that may depend on the parent's size. A [`Size`] pairs two lengths.
//!
//! Resolution never fails: lengths without a closed-form pixel value
//! (`proportional`, `flexible`) resolve to `NaN`, and callers must treat that
//! sentinel as "use the fallback" rather than feed it into geometry.

use std::ops::{Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::{EdgeSizes, Extent, Rect};

/// Reference resolution of a PostScript point.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimeters per inch.
pub const MILLIMETERS_PER_INCH: f32 = 25.4;

/// Resolution both operands are normalized to before a [`Unit`] subtraction.
pub const SUBTRACTION_DPI: f32 = 1800.0;

/// A physical length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "UnitRepr")]
pub enum Unit {
    /// A device pixel count measured at a reference resolution.
    Pixel {
        /// Number of pixels.
        value: f32,
        /// Resolution the pixel count was measured at, in dots per inch.
        dpi: f32,
    },
    /// Millimeters.
    Millimeter(f32),
    /// Inches.
    Inch(f32),
}

impl Unit {
    /// Zero length.
    pub const ZERO: Self = Self::point(0.0);

    /// A PostScript point: one pixel at 72 dpi.
    #[must_use]
    pub const fn point(value: f32) -> Self {
        Self::Pixel {
            value,
            dpi: POINTS_PER_INCH,
        }
    }

    /// Device pixels at the target resolution.
    ///
    /// ```text
    /// pixel(v, ref) → v / ref × dpi
    /// millimeter(v) → v / 25.4 × dpi
    /// inch(v)       → v × dpi
    /// ```
    #[must_use]
    pub fn pixels(&self, dpi: f32) -> f32 {
        match *self {
            Self::Pixel { value, dpi: reference } => value / reference * dpi,
            Self::Millimeter(millimeters) => millimeters / MILLIMETERS_PER_INCH * dpi,
            Self::Inch(inches) => inches * dpi,
        }
    }
}

impl Sub for Unit {
    type Output = Self;

    /// Both operands are converted at [`SUBTRACTION_DPI`], not at the
    /// resolution the result is eventually rendered at.
    fn sub(self, rhs: Self) -> Self {
        Self::Pixel {
            value: self.pixels(SUBTRACTION_DPI) - rhs.pixels(SUBTRACTION_DPI),
            dpi: SUBTRACTION_DPI,
        }
    }
}

impl Mul<f32> for Unit {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        match self {
            Self::Pixel { value, dpi } => Self::Pixel {
                value: value * rhs,
                dpi,
            },
            Self::Millimeter(millimeters) => Self::Millimeter(millimeters * rhs),
            Self::Inch(inches) => Self::Inch(inches * rhs),
        }
    }
}

/// Deserialization form of [`Unit`], which additionally accepts `point`.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum UnitRepr {
    Pixel { value: f32, dpi: f32 },
    Point(f32),
    Millimeter(f32),
    Inch(f32),
}

impl From<UnitRepr> for Unit {
    fn from(repr: UnitRepr) -> Self {
        match repr {
            UnitRepr::Pixel { value, dpi } => Self::Pixel { value, dpi },
            UnitRepr::Point(value) => Self::point(value),
            UnitRepr::Millimeter(value) => Self::Millimeter(value),
            UnitRepr::Inch(value) => Self::Inch(value),
        }
    }
}

/// A one-dimensional sizing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Ratio of the reference (parent) size.
    Relative(f32),
    /// A fixed physical length.
    Absolute(Unit),
    /// A proportional factor. Has no pixel value on its own.
    Proportional(f32),
    /// Consume all remaining space. Only meaningful inside stack distribution.
    Flexible,
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self::Absolute(Unit::ZERO);

    /// An absolute length in points.
    #[must_use]
    pub const fn points(value: f32) -> Self {
        Self::Absolute(Unit::point(value))
    }

    /// Pixel value along the horizontal axis, or `NaN` for `proportional`
    /// and `flexible` lengths.
    #[must_use]
    pub fn width_value(&self, size: Extent, dpi: f32) -> f32 {
        self.value(size.width, dpi)
    }

    /// Pixel value along the vertical axis, or `NaN` for `proportional`
    /// and `flexible` lengths.
    #[must_use]
    pub fn height_value(&self, size: Extent, dpi: f32) -> f32 {
        self.value(size.height, dpi)
    }

    /// [`Length::width_value`] with the sentinel mapped to `None`.
    #[must_use]
    pub fn resolve_width(&self, size: Extent, dpi: f32) -> Option<f32> {
        Some(self.width_value(size, dpi)).filter(|value| !value.is_nan())
    }

    /// [`Length::height_value`] with the sentinel mapped to `None`.
    #[must_use]
    pub fn resolve_height(&self, size: Extent, dpi: f32) -> Option<f32> {
        Some(self.height_value(size, dpi)).filter(|value| !value.is_nan())
    }

    fn value(&self, reference: f32, dpi: f32) -> f32 {
        match self {
            Self::Absolute(unit) => unit.pixels(dpi),
            Self::Relative(ratio) => reference * ratio,
            Self::Proportional(_) | Self::Flexible => f32::NAN,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Mul<f32> for Length {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        match self {
            Self::Absolute(unit) => Self::Absolute(unit * rhs),
            Self::Relative(ratio) => Self::Relative(ratio * rhs),
            Self::Proportional(factor) => Self::Proportional(factor * rhs),
            Self::Flexible => Self::Flexible,
        }
    }
}

/// The intrinsic size a box requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Requested width.
    pub width: Length,
    /// Requested height.
    pub height: Length,
}

impl Size {
    /// Zero on both axes.
    pub const ZERO: Self = Self::new(Length::ZERO, Length::ZERO);

    /// ISO A4, portrait, as 2480×3508 pixels at 300 dpi.
    pub const A4_PORTRAIT: Self = Self::new(
        Length::Absolute(Unit::Pixel {
            value: 2480.0,
            dpi: 300.0,
        }),
        Length::Absolute(Unit::Pixel {
            value: 3508.0,
            dpi: 300.0,
        }),
    );

    /// ISO A4, landscape.
    pub const A4_LANDSCAPE: Self = Self::new(Self::A4_PORTRAIT.height, Self::A4_PORTRAIT.width);

    /// ISO A5, portrait.
    pub const A5_PORTRAIT: Self = Self::new(
        Length::Absolute(Unit::Millimeter(148.0)),
        Length::Absolute(Unit::Millimeter(210.0)),
    );

    /// US Letter, portrait.
    pub const LETTER_PORTRAIT: Self = Self::new(
        Length::Absolute(Unit::Inch(8.5)),
        Length::Absolute(Unit::Inch(11.0)),
    );

    /// The full content area of the parent.
    pub const PARENT_CONTENT: Self = Self::new(Length::Relative(1.0), Length::Relative(1.0));

    /// Create a size from a width and a height.
    #[must_use]
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }

    /// A zero-origin rectangle of this size at the given resolution.
    ///
    /// Only absolute sizes have a meaning without a parent; any other
    /// combination yields [`Rect::ZERO`].
    #[must_use]
    pub fn bounds(&self, dpi: f32) -> Rect {
        match (self.width, self.height) {
            (Length::Absolute(width), Length::Absolute(height)) => {
                Rect::new(0.0, 0.0, width.pixels(dpi), height.pixels(dpi))
            }
            _ => Rect::ZERO,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Padding requested on each edge of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paddings {
    /// Left padding, resolved against the box's width.
    pub left: Length,
    /// Right padding, resolved against the box's width.
    pub right: Length,
    /// Top padding, resolved against the box's height.
    pub top: Length,
    /// Bottom padding, resolved against the box's height.
    pub bottom: Length,
}

impl Paddings {
    /// No padding.
    pub const ZERO: Self = Self::uniform(Length::ZERO);

    /// The same padding on every edge.
    #[must_use]
    pub const fn uniform(length: Length) -> Self {
        Self {
            left: length,
            right: length,
            top: length,
            bottom: length,
        }
    }

    /// Resolve every edge against the box's own outer size.
    ///
    /// Edges without a pixel value resolve to zero and are reported in the
    /// second element of the tuple, by edge name.
    #[must_use]
    pub fn resolve(&self, size: Extent, dpi: f32) -> (EdgeSizes, Vec<&'static str>) {
        let mut unresolved = Vec::new();
        let mut or_zero = |value: Option<f32>, edge: &'static str| {
            value.unwrap_or_else(|| {
                unresolved.push(edge);
                0.0
            })
        };
        let edges = EdgeSizes {
            left: or_zero(self.left.resolve_width(size, dpi), "left"),
            right: or_zero(self.right.resolve_width(size, dpi), "right"),
            top: or_zero(self.top.resolve_height(size, dpi), "top"),
            bottom: or_zero(self.bottom.resolve_height(size, dpi), "bottom"),
        };
        (edges, unresolved)
    }
}
