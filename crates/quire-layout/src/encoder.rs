//! The document encoder seam.

use crate::geometry::Extent;
use crate::paint::DisplayCommand;

/// Sink that turns a sequence of painted pages into a finished document.
///
/// The render loop calls [`begin_page`](DocumentEncoder::begin_page) once
/// per page, then [`execute`](DocumentEncoder::execute) for every command
/// painted on it, and [`finish`](DocumentEncoder::finish) after the last
/// page.
pub trait DocumentEncoder {
    /// The finished document.
    type Output;
    /// Failure reported by the encoder.
    type Error;

    /// Start a new page of `size` device pixels at `dpi`.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn begin_page(&mut self, size: Extent, dpi: f32) -> Result<(), Self::Error>;

    /// Apply one command to the current page.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn execute(&mut self, command: &DisplayCommand) -> Result<(), Self::Error>;

    /// Close the document.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn finish(self) -> Result<Self::Output, Self::Error>;
}
