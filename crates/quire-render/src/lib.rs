//! Document encoders for Quire.
//!
//! Each encoder implements [`quire_layout::DocumentEncoder`] and consumes
//! the display lists produced by [`Environment::render_document`]:
//!
//! - [`PdfEncoder`] writes a PDF with one page per document page
//! - [`RasterEncoder`] draws RGBA images with fontdue glyphs
//! - [`JsonEncoder`] dumps the display lists as JSON
//!
//! The `render_*` helpers run the whole pipeline for one output format.

/// Error types.
pub mod error;
/// System fonts and font metrics.
pub mod fonts;
/// Display list dump.
pub mod json;
/// PDF output.
pub mod pdf;
/// Raster output.
pub mod raster;

pub use error::RenderError;
pub use fonts::{FontSet, FontdueFontMetrics};
pub use json::{JsonEncoder, JsonPage};
pub use pdf::PdfEncoder;
pub use raster::{RasterEncoder, encode_png, stack_pages};

use quire_layout::{BoxTree, Environment, FontMetrics, PageId};

/// Render `pages` to PDF bytes.
///
/// Text is drawn with the standard Helvetica fonts; measure it with a
/// [`FontSet::load_helvetica_compatible`] set so lines fit their boxes.
///
/// # Errors
///
/// Returns an error if the encoder fails.
pub fn render_pdf(
    env: &mut Environment,
    tree: &mut BoxTree,
    pages: &[PageId],
    metrics: &dyn FontMetrics,
) -> Result<Vec<u8>, RenderError> {
    env.render_document(tree, pages, metrics, PdfEncoder::new())
}

/// Render `pages` to a PNG image, pages stacked top to bottom.
///
/// Text is measured and drawn with the same fonts.
///
/// # Errors
///
/// Returns an error if a page is too large to rasterize, if there are no
/// pages, or if PNG encoding fails.
pub fn render_png(
    env: &mut Environment,
    tree: &mut BoxTree,
    pages: &[PageId],
    fonts: &FontSet,
) -> Result<Vec<u8>, RenderError> {
    let metrics = FontdueFontMetrics::new(fonts);
    let images = env.render_document(tree, pages, &metrics, RasterEncoder::new(fonts))?;
    encode_png(&stack_pages(&images)?)
}

/// Render `pages` to a JSON dump of their display lists.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(
    env: &mut Environment,
    tree: &mut BoxTree,
    pages: &[PageId],
    metrics: &dyn FontMetrics,
) -> Result<String, RenderError> {
    env.render_document(tree, pages, metrics, JsonEncoder::new())
}
