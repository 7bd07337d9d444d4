//! Stack distribution.
//!
//! A stack places its children one after another along a single axis,
//! carving each child's outer rectangle out of a shrinking "remaining"
//! rectangle that starts as the stack's content rectangle.
//!
//! ```text
//!  vertical stack, children added with add / add(from_end) / fill
//!
//!  ┌──────────────────────┐ ← content.y
//!  │ child 1 (top)        │
//!  ├──────────────────────┤ ← cursor after child 1
//!  │ child 3 (fill)       │
//!  │                      │
//!  ├──────────────────────┤
//!  │ child 2 (bottom)     │
//!  └──────────────────────┘ ← content.max_y()
//! ```
//!
//! Children are processed in list order. A child that takes the full
//! remaining extent (anchored on both main-axis edges) is greedy, so it
//! is normally the last or only entry.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::dimension::Size;
use crate::edges::{Anchors, Borders, Edges};
use crate::geometry::Rect;
use crate::tree::BoxId;
use crate::writing_direction::WritingDirection;

/// Axis a stack distributes its children along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Children are stacked top to bottom (or bottom to top).
    #[default]
    Vertical,
    /// Children are stacked along the writing direction.
    Horizontal,
}

/// Association between a stack and one of its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildLayout {
    /// The child box.
    pub child: BoxId,
    /// Edges the child is pinned to.
    pub anchors: Anchors,
    /// Edges of the child's outer rectangle to stroke.
    pub borders: Borders,
    /// Fill painted behind the child's outer rectangle.
    pub fill_color: Option<Color>,
}

impl ChildLayout {
    /// A layout with the default anchors and no decoration.
    #[must_use]
    pub const fn new(child: BoxId) -> Self {
        Self {
            child,
            anchors: Edges::DEFAULT_ANCHORS,
            borders: Borders::empty(),
            fill_color: None,
        }
    }
}

/// State of a stack box: its direction and ordered child layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    direction: Direction,
    layouts: Vec<ChildLayout>,
    border_color: Color,
}

impl Stack {
    /// An empty stack.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            layouts: Vec::new(),
            border_color: Color::BLACK,
        }
    }

    /// Distribution axis.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Child layouts in distribution order.
    #[must_use]
    pub fn layouts(&self) -> &[ChildLayout] {
        &self.layouts
    }

    /// Color used to stroke child borders.
    #[must_use]
    pub const fn border_color(&self) -> Color {
        self.border_color
    }

    pub(crate) fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    pub(crate) fn push(&mut self, layout: ChildLayout) {
        self.layouts.push(layout);
    }

    /// Anchors given to a child appended with `add`.
    ///
    /// | direction  | `from_end` | anchors                      |
    /// |------------|------------|------------------------------|
    /// | vertical   | false      | top, leading, trailing       |
    /// | vertical   | true       | bottom, leading, trailing    |
    /// | horizontal | false      | leading, top, bottom         |
    /// | horizontal | true       | trailing, top, bottom        |
    #[must_use]
    pub const fn anchors_for(direction: Direction, from_end: bool) -> Anchors {
        match (direction, from_end) {
            (Direction::Vertical, false) => Edges::TOP.union(Edges::HORIZONTAL),
            (Direction::Vertical, true) => Edges::BOTTOM.union(Edges::HORIZONTAL),
            (Direction::Horizontal, false) => Edges::LEADING.union(Edges::VERTICAL),
            (Direction::Horizontal, true) => Edges::TRAILING.union(Edges::VERTICAL),
        }
    }
}

/// Compute the outer rectangle of every child that takes part in layout.
///
/// `content` is the stack's own content rectangle and `size_of` returns a
/// child's declared size. Requested extents are clamped between zero and
/// the remaining space. Children are skipped (absent from the result)
/// when they are not anchored on both cross-axis edges, when their
/// main-axis length has no pixel value, or when they are anchored on
/// neither main-axis edge.
///
/// Horizontal stacks map `leading`/`trailing` to physical left/right
/// through `writing_direction`; vertical stacks ignore it.
pub fn distribute(
    layouts: &[ChildLayout],
    size_of: impl Fn(BoxId) -> Size,
    content: Rect,
    direction: Direction,
    writing_direction: WritingDirection,
    dpi: f32,
) -> Vec<(BoxId, Rect)> {
    let (cross_edges, start_edge, end_edge) = match direction {
        Direction::Vertical => (Edges::HORIZONTAL, Edges::TOP, Edges::BOTTOM),
        Direction::Horizontal => (
            Edges::VERTICAL,
            writing_direction.left_anchor(),
            writing_direction.right_anchor(),
        ),
    };

    let mut remaining = content;
    let mut placed = Vec::with_capacity(layouts.len());

    for layout in layouts {
        let anchors = layout.anchors;
        if !anchors.contains(cross_edges) {
            log::trace!(target: "quire::stack", "{:?}: not anchored across {direction:?}, skipped", layout.child);
            continue;
        }

        let available = main_extent(&remaining, direction);
        let extent = if anchors.contains(start_edge | end_edge) {
            available
        } else {
            let size = size_of(layout.child);
            let requested = match direction {
                Direction::Vertical => size.height.height_value(content.size(), dpi),
                Direction::Horizontal => size.width.width_value(content.size(), dpi),
            };
            if requested.is_nan() {
                log::trace!(target: "quire::stack", "{:?}: main-axis length unresolved, skipped", layout.child);
                continue;
            }
            requested.clamp(0.0, available.max(0.0))
        };

        let rect = if anchors.contains(start_edge) {
            take_from_start(&mut remaining, extent, direction)
        } else if anchors.contains(end_edge) {
            take_from_end(&mut remaining, extent, direction)
        } else {
            log::trace!(target: "quire::stack", "{:?}: no main-axis anchor, skipped", layout.child);
            continue;
        };

        log::trace!(target: "quire::stack", "{:?}: placed at {rect:?}", layout.child);
        placed.push((layout.child, rect));
    }

    placed
}

const fn main_extent(rect: &Rect, direction: Direction) -> f32 {
    match direction {
        Direction::Vertical => rect.height,
        Direction::Horizontal => rect.width,
    }
}

/// Place a slice at the cursor and advance the cursor past it.
fn take_from_start(remaining: &mut Rect, extent: f32, direction: Direction) -> Rect {
    match direction {
        Direction::Vertical => {
            let rect = Rect::new(remaining.x, remaining.y, remaining.width, extent);
            remaining.y += extent;
            remaining.height -= extent;
            rect
        }
        Direction::Horizontal => {
            let rect = Rect::new(remaining.x, remaining.y, extent, remaining.height);
            remaining.x += extent;
            remaining.width -= extent;
            rect
        }
    }
}

/// Place a slice flush against the far edge of the remaining rectangle.
fn take_from_end(remaining: &mut Rect, extent: f32, direction: Direction) -> Rect {
    match direction {
        Direction::Vertical => {
            let rect = Rect::new(
                remaining.x,
                remaining.max_y() - extent,
                remaining.width,
                extent,
            );
            remaining.height -= extent;
            rect
        }
        Direction::Horizontal => {
            let rect = Rect::new(
                remaining.max_x() - extent,
                remaining.y,
                extent,
                remaining.height,
            );
            remaining.width -= extent;
            rect
        }
    }
}
