//! Edge sets used for anchoring children and stroking borders.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of box edges.
    ///
    /// `LEADING` and `TRAILING` are writing-direction relative; they are
    /// mapped to physical left/right edges only when a horizontal stack
    /// places its children.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Edges: u8 {
        /// Top edge.
        const TOP = 1 << 0;
        /// Bottom edge.
        const BOTTOM = 1 << 1;
        /// Start edge of the writing direction.
        const LEADING = 1 << 2;
        /// End edge of the writing direction.
        const TRAILING = 1 << 3;
    }
}

/// Edges a stack child is pinned to during distribution.
pub type Anchors = Edges;

/// Edges of a stack child's outer rectangle to stroke.
pub type Borders = Edges;

impl Edges {
    /// Default anchors for a stack child: grow from the top, fill the cross axis.
    pub const DEFAULT_ANCHORS: Self = Self::TOP.union(Self::LEADING).union(Self::TRAILING);

    /// Both vertical edges.
    pub const VERTICAL: Self = Self::TOP.union(Self::BOTTOM);

    /// Both horizontal (writing-direction relative) edges.
    pub const HORIZONTAL: Self = Self::LEADING.union(Self::TRAILING);
}
