//! Paragraph measurement and line fitting.
//!
//! This is the text service behind [`TextBox`](crate::TextBox): it
//! measures a [`StyledText`] run's natural size and turns it into
//! positioned `DrawText` commands for a given rectangle. Glyph advances
//! come from a [`FontMetrics`] implementation; the paragraph only decides
//! where lines break, what gets truncated, and where each line sits.
//!
//! Hard line breaks (`\n`) always start a new line. The single-line modes
//! fit every hard line independently; `WordWrap` additionally breaks at
//! whitespace, and inside a word when the word alone is too wide.

use crate::geometry::{Extent, Rect};
use crate::paint::DisplayCommand;
use crate::text::{FontMetrics, LineBreakMode, StyledText, TextAlign};
use crate::writing_direction::WritingDirection;

/// Character inserted where text was truncated.
pub const ELLIPSIS: char = '\u{2026}';

/// Tolerance for floating-point comparisons against the available height.
const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Glyph {
    ch: char,
    span: usize,
    advance: f32,
}

#[derive(Debug, Clone, Default)]
struct Line {
    glyphs: Vec<Glyph>,
    /// Span the line started in; decides the height of an empty line.
    span_hint: usize,
}

impl Line {
    fn width(&self) -> f32 {
        self.glyphs.iter().map(|glyph| glyph.advance).sum()
    }

    fn trim_end(mut self) -> Self {
        while self.glyphs.last().is_some_and(|glyph| glyph.ch.is_whitespace()) {
            let _ = self.glyphs.pop();
        }
        self
    }
}

/// A styled run bound to the metrics and resolution it is measured with.
pub struct Paragraph<'a> {
    text: &'a StyledText,
    metrics: &'a dyn FontMetrics,
    font_sizes: Vec<f32>,
}

impl<'a> Paragraph<'a> {
    /// Prepare `text` for measurement at the given resolution.
    #[must_use]
    pub fn new(text: &'a StyledText, metrics: &'a dyn FontMetrics, dpi: f32) -> Self {
        let font_sizes = text
            .spans
            .iter()
            .map(|span| span.font.pixel_size(dpi))
            .collect();
        Self {
            text,
            metrics,
            font_sizes,
        }
    }

    /// Natural size of the run.
    ///
    /// Single-line modes measure every hard line unconstrained. `WordWrap`
    /// wraps at `wrap_width` first.
    #[must_use]
    pub fn measure(&self, wrap_width: f32) -> Extent {
        let lines = match self.text.line_break {
            LineBreakMode::WordWrap => self.wrapped_lines(wrap_width),
            _ => self.hard_lines(),
        };
        Extent {
            width: lines.iter().map(Line::width).fold(0.0, f32::max),
            height: lines.iter().map(|line| self.line_height(line)).sum(),
        }
    }

    /// `DrawText` commands for the run laid out in `rect`.
    ///
    /// Lines are stacked from the top of `rect`; lines after the first that
    /// would cross its bottom edge are dropped. `Natural` alignment follows
    /// the writing direction.
    #[must_use]
    pub fn layout(&self, rect: Rect, writing_direction: WritingDirection) -> Vec<DisplayCommand> {
        let lines = self.fit(rect.width);
        let mut commands = Vec::new();
        let mut y = rect.y;

        for (index, line) in lines.iter().enumerate() {
            let height = self.line_height(line);
            if index > 0 && y + height > rect.max_y() + EPSILON {
                break;
            }

            let slack = rect.width - line.width();
            let offset = match (self.text.alignment, writing_direction) {
                (TextAlign::Left, _) | (TextAlign::Natural, WritingDirection::LeftToRight) => 0.0,
                (TextAlign::Right, _) | (TextAlign::Natural, WritingDirection::RightToLeft) => slack,
                (TextAlign::Center, _) => slack / 2.0,
            };
            let baseline = y + self.ascent(line);
            let mut x = rect.x + offset;

            for group in line.glyphs.chunk_by(|a, b| a.span == b.span) {
                let advance: f32 = group.iter().map(|glyph| glyph.advance).sum();
                let text: String = group.iter().map(|glyph| glyph.ch).collect();
                if !text.trim().is_empty() {
                    let span_index = group[0].span;
                    let span = &self.text.spans[span_index];
                    commands.push(DisplayCommand::DrawText {
                        x,
                        baseline,
                        text,
                        font_size: self.font_sizes[span_index],
                        face: span.font.face,
                        color: span.color,
                    });
                }
                x += advance;
            }
            y += height;
        }

        commands
    }

    fn advance(&self, ch: char, span: usize) -> f32 {
        let mut buf = [0; 4];
        self.metrics.text_width(
            ch.encode_utf8(&mut buf),
            self.font_sizes[span],
            self.text.spans[span].font.face,
        )
    }

    fn glyph(&self, ch: char, span: usize) -> Glyph {
        Glyph {
            ch,
            span,
            advance: self.advance(ch, span),
        }
    }

    fn hard_lines(&self) -> Vec<Line> {
        if self.text.spans.iter().all(|span| span.text.is_empty()) {
            return Vec::new();
        }
        let mut lines = Vec::new();
        let mut current = Line::default();
        for (index, span) in self.text.spans.iter().enumerate() {
            if current.glyphs.is_empty() {
                current.span_hint = index;
            }
            for ch in span.text.chars() {
                match ch {
                    '\n' => {
                        lines.push(std::mem::take(&mut current));
                        current.span_hint = index;
                    }
                    '\t' => current.glyphs.push(self.glyph(' ', index)),
                    ch if ch.is_control() => {}
                    ch => current.glyphs.push(self.glyph(ch, index)),
                }
            }
        }
        lines.push(current);
        lines
    }

    fn line_height(&self, line: &Line) -> f32 {
        self.line_spans(line)
            .map(|span| self.metrics.line_height(self.font_sizes[span]))
            .fold(0.0, f32::max)
    }

    fn ascent(&self, line: &Line) -> f32 {
        self.line_spans(line)
            .map(|span| self.metrics.ascent(self.font_sizes[span]))
            .fold(0.0, f32::max)
    }

    fn line_spans<'l>(&self, line: &'l Line) -> Box<dyn Iterator<Item = usize> + 'l> {
        if line.glyphs.is_empty() {
            Box::new(std::iter::once(line.span_hint))
        } else {
            Box::new(line.glyphs.iter().map(|glyph| glyph.span))
        }
    }

    fn fit(&self, width: f32) -> Vec<Line> {
        match self.text.line_break {
            LineBreakMode::WordWrap => self.wrapped_lines(width),
            mode => self
                .hard_lines()
                .into_iter()
                .map(|line| {
                    if line.width() <= width {
                        return line;
                    }
                    match mode {
                        LineBreakMode::Clip => clip(line, width),
                        LineBreakMode::TruncateHead => self.truncate_head(line, width),
                        LineBreakMode::TruncateMiddle => self.truncate_middle(line, width),
                        _ => self.truncate_tail(line, width),
                    }
                })
                .collect(),
        }
    }

    fn wrapped_lines(&self, width: f32) -> Vec<Line> {
        self.hard_lines()
            .into_iter()
            .flat_map(|line| wrap(line, width))
            .collect()
    }

    fn truncate_tail(&self, line: Line, width: f32) -> Line {
        let mut kept = Vec::new();
        let mut used = 0.0;
        for glyph in &line.glyphs {
            if used + glyph.advance + self.advance(ELLIPSIS, glyph.span) > width {
                break;
            }
            used += glyph.advance;
            kept.push(*glyph);
        }
        while kept.last().is_some_and(|glyph| glyph.ch.is_whitespace()) {
            let _ = kept.pop();
        }
        let span = kept.last().or(line.glyphs.first()).map_or(line.span_hint, |g| g.span);
        kept.push(self.glyph(ELLIPSIS, span));
        Line {
            glyphs: kept,
            span_hint: line.span_hint,
        }
    }

    fn truncate_head(&self, line: Line, width: f32) -> Line {
        let mut kept = Vec::new();
        let mut used = 0.0;
        for glyph in line.glyphs.iter().rev() {
            if used + glyph.advance + self.advance(ELLIPSIS, glyph.span) > width {
                break;
            }
            used += glyph.advance;
            kept.push(*glyph);
        }
        while kept.last().is_some_and(|glyph| glyph.ch.is_whitespace()) {
            let _ = kept.pop();
        }
        kept.reverse();
        let span = kept.first().or(line.glyphs.last()).map_or(line.span_hint, |g| g.span);
        kept.insert(0, self.glyph(ELLIPSIS, span));
        Line {
            glyphs: kept,
            span_hint: line.span_hint,
        }
    }

    fn truncate_middle(&self, line: Line, width: f32) -> Line {
        let first_span = line.glyphs.first().map_or(line.span_hint, |g| g.span);
        let budget = width - self.advance(ELLIPSIS, first_span);

        let mut head = Vec::new();
        let mut head_width = 0.0;
        for glyph in &line.glyphs {
            if head_width + glyph.advance > budget / 2.0 {
                break;
            }
            head_width += glyph.advance;
            head.push(*glyph);
        }

        let mut tail = Vec::new();
        let mut tail_width = 0.0;
        for glyph in line.glyphs[head.len()..].iter().rev() {
            if head_width + tail_width + glyph.advance > budget {
                break;
            }
            tail_width += glyph.advance;
            tail.push(*glyph);
        }
        tail.reverse();

        let span = head.last().map_or(first_span, |g| g.span);
        head.push(self.glyph(ELLIPSIS, span));
        head.extend(tail);
        Line {
            glyphs: head,
            span_hint: line.span_hint,
        }
    }
}

fn clip(line: Line, width: f32) -> Line {
    let mut used = 0.0;
    let glyphs = line
        .glyphs
        .into_iter()
        .take_while(|glyph| {
            used += glyph.advance;
            used <= width
        })
        .collect();
    Line {
        glyphs,
        span_hint: line.span_hint,
    }
}

/// Greedy word wrap of one hard line.
fn wrap(line: Line, width: f32) -> Vec<Line> {
    let span_hint = line.span_hint;
    let mut lines = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut current_width = 0.0;
    let mut break_at: Option<usize> = None;

    for glyph in line.glyphs {
        while !current.is_empty() && !glyph.ch.is_whitespace() && current_width + glyph.advance > width {
            let split = break_at.take().unwrap_or(current.len());
            let rest: Vec<Glyph> = current
                .split_off(split)
                .into_iter()
                .skip_while(|g| g.ch.is_whitespace())
                .collect();
            lines.push(
                Line {
                    glyphs: std::mem::replace(&mut current, rest),
                    span_hint,
                }
                .trim_end(),
            );
            current_width = current.iter().map(|g| g.advance).sum();
        }
        current.push(glyph);
        current_width += glyph.advance;
        if glyph.ch.is_whitespace() {
            break_at = Some(current.len());
        }
    }

    lines.push(
        Line {
            glyphs: current,
            span_hint,
        }
        .trim_end(),
    );
    lines
}
