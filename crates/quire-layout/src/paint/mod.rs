//! Painting
//!
//! This module converts a resolved box tree into a display list of drawing
//! commands, one list per page. The display list can then be executed by
//! any document encoder (PDF, raster, JSON dump).
//!
//! # Architecture
//!
//! ```text
//! BoxTree → resolve + paint → DisplayList → DocumentEncoder
//! ```
//!
//! Bounds resolution and painting are interleaved per box: a box resolves
//! its own geometry, paints, and only then descends into its children.

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
