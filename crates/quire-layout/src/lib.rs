//! Declarative box layout for paginated documents.
//!
//! # Scope
//!
//! This crate implements:
//! - **Measurement model** ([`Unit`], [`Length`], [`Size`], [`Paddings`])
//!   - Physical units convertible to device pixels at any resolution
//!   - Relative, proportional and flexible sizing instructions
//!
//! - **Box tree** ([`BoxTree`])
//!   - Arena of plain boxes, stacks, tables, text leaves and pages
//!   - Two-phase bounds protocol: the parent assigns the outer rectangle,
//!     the box resolves its padded content rectangle
//!
//! - **Stack distribution** ([`stack::distribute`])
//!   - One-axis distribution with anchors, clamping and fill children
//!   - Writing-direction aware horizontal placement
//!
//! - **Text boxes** ([`TextBox`], [`Paragraph`])
//!   - Plain or styled runs, vertical alignment, truncation and word wrap
//!
//! - **Painting and the render loop** ([`Painter`], [`Environment`])
//!   - Display lists per page, fed to any [`DocumentEncoder`]
//!
//! # Failure model
//!
//! Layout never returns errors. Lengths without a pixel value resolve to
//! `NaN`, boxes that were never placed keep no content rectangle and draw
//! nothing, and children that cannot be distributed are left out. Such
//! problems are reported once each through
//! [`quire_common::warning::warn_once`]. Only edits to the tree are
//! checked, with [`TreeError`].

/// sRGB colors.
pub mod color;
/// Units, lengths and sizes.
pub mod dimension;
/// Anchor and border edge sets.
pub mod edges;
/// The document encoder interface.
pub mod encoder;
/// Render environment and render loop.
pub mod environment;
/// Tree construction errors.
pub mod error;
/// Resolved rectangles in device pixels.
pub mod geometry;
/// Display lists and the painter.
pub mod paint;
/// Paragraph measurement and line fitting.
pub mod paragraph;
/// Stack state and distribution.
pub mod stack;
/// Text boxes, styles and font metrics.
pub mod text;
/// The box arena.
pub mod tree;
/// Writing direction.
pub mod writing_direction;

// Re-exports for convenience
pub use color::{Color, InvalidColor};
pub use dimension::{Length, Paddings, Size, Unit};
pub use edges::{Anchors, Borders, Edges};
pub use encoder::DocumentEncoder;
pub use environment::Environment;
pub use error::TreeError;
pub use geometry::{EdgeSizes, Extent, Rect};
pub use paint::{DisplayCommand, DisplayList, Painter};
pub use paragraph::Paragraph;
pub use stack::{ChildLayout, Direction, Stack};
pub use text::{
    ApproximateFontMetrics, Font, FontFace, FontMetrics, LineBreakMode, StyledText, TextAlign,
    TextBox, TextContent, TextSpan, TextStyle, VerticalAlignment,
};
pub use tree::{BoxId, BoxKind, BoxTree, Node, PageId, StackId};
pub use writing_direction::WritingDirection;
