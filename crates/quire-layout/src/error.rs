//! Errors raised while building a box tree.
//!
//! Layout itself never fails; see the crate docs for how unresolvable
//! input degrades. Only structural edits to the tree are checked.

use thiserror::Error;

use crate::tree::BoxId;

/// A rejected edit to a [`BoxTree`](crate::BoxTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The child already belongs to a stack or page.
    #[error("box {child} already has a parent")]
    AlreadyAttached {
        /// The box that was being attached.
        child: BoxId,
    },

    /// Attaching the child would make a box its own ancestor.
    #[error("adding box {child} to {parent} would create a cycle")]
    WouldCycle {
        /// The stack the child was being added to.
        parent: BoxId,
        /// The box that was being attached.
        child: BoxId,
    },

    /// The handle does not belong to this tree.
    #[error("no box {0} in this tree")]
    UnknownBox(BoxId),
}
