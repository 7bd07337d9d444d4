//! Error types for the document encoders.

use thiserror::Error;

/// Failure while encoding a rendered document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Raster image encoding failed.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Page geometry cannot be converted at this resolution.
    #[error("resolution must be a positive number of dots per inch, got {0}")]
    InvalidDpi(f32),

    /// A page cannot be rasterized at the requested size.
    #[error("page of {width}x{height} pixels cannot be rasterized (limit {limit} per side)")]
    PageTooLarge {
        /// Page width in pixels.
        width: f32,
        /// Page height in pixels.
        height: f32,
        /// Largest supported side length.
        limit: u32,
    },

    /// A raster document needs at least one page.
    #[error("document has no pages")]
    NoPages,
}
