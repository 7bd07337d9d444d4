//! PDF encoder built on `pdf-writer`.
//!
//! Device pixels are converted to PDF points (`px * 72 / dpi`) and the y
//! axis is flipped, since PDF user space grows upwards from the bottom-left
//! corner. Text uses the four standard Helvetica faces, which every viewer
//! provides, with `WinAnsiEncoding`.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use quire_common::warning::warn_once;
use quire_layout::{Color, DisplayCommand, DocumentEncoder, Extent, FontFace};

use crate::error::RenderError;

/// Resource names and base fonts, indexed by [`font_index`].
const FONTS: [(&[u8], &[u8]); 4] = [
    (b"F1", b"Helvetica"),
    (b"F2", b"Helvetica-Bold"),
    (b"F3", b"Helvetica-Oblique"),
    (b"F4", b"Helvetica-BoldOblique"),
];

const fn font_index(face: FontFace) -> usize {
    match face {
        FontFace::Regular => 0,
        FontFace::Bold => 1,
        FontFace::Italic => 2,
        FontFace::BoldItalic => 3,
    }
}

struct PdfPage {
    width: f32,
    height: f32,
    /// Points per device pixel.
    scale: f32,
    content: Content,
}

impl PdfPage {
    fn x(&self, px: f32) -> f32 {
        px * self.scale
    }

    fn y(&self, px: f32) -> f32 {
        self.height - px * self.scale
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (left, bottom) = (self.x(x), self.y(y + height));
        let (width, height) = (width * self.scale, height * self.scale);
        let _ = self.content.rect(left, bottom, width, height);
    }
}

/// Encoder writing one PDF page per rendered page.
#[derive(Default)]
pub struct PdfEncoder {
    pages: Vec<PdfPage>,
}

impl PdfEncoder {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        if color.a == 0 {
            return;
        }
        let (r, g, b) = color.to_unit_rgb();
        let _ = page.content.save_state().set_fill_rgb(r, g, b);
        page.rect(x, y, width, height);
        let _ = page.content.fill_nonzero().restore_state();
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, line_width: f32) {
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        if color.a == 0 {
            return;
        }
        let (r, g, b) = color.to_unit_rgb();
        let scale = page.scale;
        let _ = page
            .content
            .save_state()
            .set_stroke_rgb(r, g, b)
            .set_line_width(line_width * scale);
        page.rect(x, y, width, height);
        let _ = page.content.stroke().restore_state();
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font_size: f32, face: FontFace, color: Color) {
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let bytes = win_ansi(text);
        if bytes.is_empty() || color.a == 0 {
            return;
        }
        let (r, g, b) = color.to_unit_rgb();
        let (origin_x, origin_y) = (page.x(x), page.y(baseline));
        let size = font_size * page.scale;
        let _ = page
            .content
            .save_state()
            .set_fill_rgb(r, g, b)
            .begin_text()
            .set_font(Name(FONTS[font_index(face)].0), size)
            .next_line(origin_x, origin_y)
            .show(Str(&bytes))
            .end_text()
            .restore_state();
    }
}

impl DocumentEncoder for PdfEncoder {
    type Output = Vec<u8>;
    type Error = RenderError;

    fn begin_page(&mut self, size: Extent, dpi: f32) -> Result<(), Self::Error> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(RenderError::InvalidDpi(dpi));
        }
        let scale = 72.0 / dpi;
        self.pages.push(PdfPage {
            width: size.width * scale,
            height: size.height * scale,
            scale,
            content: Content::new(),
        });
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

    #[allow(clippy::cast_possible_wrap)]
    fn finish(self) -> Result<Self::Output, Self::Error> {
        let mut next_id = 1i32;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let font_ids: Vec<Ref> = FONTS.iter().map(|_| alloc()).collect();
        let page_ids: Vec<(Ref, Ref)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();

        let mut pdf = Pdf::new();
        let _ = pdf.catalog(catalog_id).pages(pages_id);
        let _ = pdf
            .pages(pages_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);

        for (&(_, base_font), &font_id) in FONTS.iter().zip(&font_ids) {
            let _ = pdf
                .type1_font(font_id)
                .base_font(Name(base_font))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (page, &(page_id, content_id)) in self.pages.into_iter().zip(&page_ids) {
            {
                let mut pdf_page = pdf.page(page_id);
                let _ = pdf_page
                    .media_box(Rect::new(0.0, 0.0, page.width, page.height))
                    .parent(pages_id)
                    .contents(content_id);
                let mut resources = pdf_page.resources();
                let mut fonts = resources.fonts();
                for (&(name, _), &font_id) in FONTS.iter().zip(&font_ids) {
                    let _ = fonts.pair(Name(name), font_id);
                }
            }
            let _ = pdf.stream(content_id, &page.content.finish());
        }

        log::debug!(target: "quire::pdf", "wrote {} pages", page_ids.len());
        Ok(pdf.finish())
    }
}

/// Encode text as `WinAnsiEncoding` bytes. Characters outside the encoding become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| {
            win_ansi_byte(ch).unwrap_or_else(|| {
                let _ = warn_once(
                    "pdf",
                    &format!("character {ch:?} has no WinAnsi code; drawn as '?'"),
                );
                b'?'
            })
        })
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    if (0x20..=0x7e).contains(&code) || (0xa0..=0xff).contains(&code) {
        return u8::try_from(code).ok();
    }
    let byte = match ch {
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(byte)
}
