//! Writing direction and the mapping of logical anchors to physical sides.

use serde::{Deserialize, Serialize};

use crate::edges::Anchors;

/// Inline progression of the document.
///
/// Mapping:
///
/// | Direction       | leading | trailing |
/// |-----------------|---------|----------|
/// | `LeftToRight`   | left    | right    |
/// | `RightToLeft`   | right   | left     |
///
/// Top and bottom are never affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingDirection {
    /// Lines progress from left to right.
    #[default]
    #[serde(alias = "ltr")]
    LeftToRight,
    /// Lines progress from right to left.
    #[serde(alias = "rtl")]
    RightToLeft,
}

impl WritingDirection {
    /// The logical anchor that maps to the physical left edge.
    #[must_use]
    pub const fn left_anchor(self) -> Anchors {
        match self {
            Self::LeftToRight => Anchors::LEADING,
            Self::RightToLeft => Anchors::TRAILING,
        }
    }

    /// The logical anchor that maps to the physical right edge.
    #[must_use]
    pub const fn right_anchor(self) -> Anchors {
        match self {
            Self::LeftToRight => Anchors::TRAILING,
            Self::RightToLeft => Anchors::LEADING,
        }
    }
}
