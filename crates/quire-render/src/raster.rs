//! Raster encoder - executes display lists into RGBA page images.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage, imageops};
use quire_common::warning::warn_once;
use quire_layout::{Color, DisplayCommand, DocumentEncoder, Extent, FontFace};

use crate::error::RenderError;
use crate::fonts::FontSet;

/// Largest page side, in pixels, the raster encoder accepts.
pub const MAX_PAGE_SIDE: u32 = 16_384;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Software encoder that draws every page into a pixel buffer.
///
/// Each page starts as a white image of the page size in device pixels.
/// Text is drawn with the glyphs of a [`FontSet`]; when the set holds no
/// fonts, text commands are skipped with a one-time warning.
pub struct RasterEncoder<'a> {
    fonts: &'a FontSet,
    pages: Vec<RgbaImage>,
}

impl<'a> RasterEncoder<'a> {
    /// Create an encoder drawing text with `fonts`.
    #[must_use]
    pub const fn new(fonts: &'a FontSet) -> Self {
        Self {
            fonts,
            pages: Vec::new(),
        }
    }

    fn current(&mut self) -> Option<&mut RgbaImage> {
        self.pages.last_mut()
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(buffer) = self.current() else {
            return;
        };
        if color.a == 0 {
            return;
        }
        let rgba = Rgba([color.r, color.g, color.b, color.a]);
        let (buffer_width, buffer_height) = buffer.dimensions();
        let x0 = x.round().max(0.0) as u32;
        let y0 = y.round().max(0.0) as u32;
        let x1 = ((x + width).round().max(0.0) as u32).min(buffer_width);
        let y1 = ((y + height).round().max(0.0) as u32).min(buffer_height);

        for py in y0..y1 {
            for px in x0..x1 {
                if color.a == 255 {
                    buffer.put_pixel(px, py, rgba);
                } else {
                    let bg = *buffer.get_pixel(px, py);
                    buffer.put_pixel(px, py, alpha_blend(rgba, bg, color.a));
                }
            }
        }
    }

    /// Strokes are centered on the rectangle edges, like the PDF operator.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, line_width: f32) {
        let half = line_width / 2.0;
        let (left, top) = (x - half, y - half);
        let outer_width = width + line_width;
        self.fill_rect(left, top, outer_width, line_width, color);
        self.fill_rect(left, y + height - half, outer_width, line_width, color);
        self.fill_rect(left, y + half, line_width, height - line_width, color);
        self.fill_rect(x + width - half, y + half, line_width, height - line_width, color);
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font_size: f32, face: FontFace, color: Color) {
        let fonts = self.fonts;
        let Some(font) = fonts.face(face) else {
            let _ = warn_once("raster", "no font available; text is not rasterized");
            return;
        };
        let Some(buffer) = self.current() else {
            return;
        };

        let rgba = Rgba([color.r, color.g, color.b, color.a]);
        let (width, height) = buffer.dimensions();
        let mut cursor_x = x;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, bitmap) = font.rasterize(ch, font_size);

            // fontdue places the bitmap relative to the baseline, y up.
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline.round() as i32 - (metrics.height as i32 + metrics.ymin);

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                        let alpha = (u16::from(coverage) * u16::from(color.a) / 255) as u8;
                        let bg = *buffer.get_pixel(px as u32, py as u32);
                        buffer.put_pixel(px as u32, py as u32, alpha_blend(rgba, bg, alpha));
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}

impl DocumentEncoder for RasterEncoder<'_> {
    type Output = Vec<RgbaImage>;
    type Error = RenderError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn begin_page(&mut self, size: Extent, dpi: f32) -> Result<(), Self::Error> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(RenderError::InvalidDpi(dpi));
        }
        let width = size.width.round();
        let height = size.height.round();
        let fits = |side: f32| (1.0..=MAX_PAGE_SIDE as f32).contains(&side);
        if !(fits(width) && fits(height)) {
            return Err(RenderError::PageTooLarge {
                width: size.width,
                height: size.height,
                limit: MAX_PAGE_SIDE,
            });
        }
        self.pages
            .push(ImageBuffer::from_pixel(width as u32, height as u32, WHITE));
        Ok(())
    }

    fn execute(&mut self, command: &DisplayCommand) -> Result<(), Self::Error> {
        match command {
            DisplayCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => self.fill_rect(*x, *y, *width, *height, *color),
            DisplayCommand::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => self.stroke_rect(*x, *y, *width, *height, *color, *line_width),
            DisplayCommand::DrawText {
                x,
                baseline,
                text,
                font_size,
                face,
                color,
            } => self.draw_text(text, *x, *baseline, *font_size, *face, *color),
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, Self::Error> {
        Ok(self.pages)
    }
}

/// Stack page images top to bottom on a white sheet as wide as the widest page.
///
/// # Errors
///
/// Returns [`RenderError::NoPages`] when `pages` is empty.
pub fn stack_pages(pages: &[RgbaImage]) -> Result<RgbaImage, RenderError> {
    let width = pages.iter().map(RgbaImage::width).max().ok_or(RenderError::NoPages)?;
    let height = pages.iter().map(RgbaImage::height).sum();
    let mut sheet = ImageBuffer::from_pixel(width, height, WHITE);
    let mut top = 0;
    for page in pages {
        imageops::replace(&mut sheet, page, 0, i64::from(top));
        top += page.height();
    }
    Ok(sheet)
}

/// Encode an image as PNG bytes.
///
/// # Errors
///
/// Returns an error if the image encoder fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
