//! Painter - resolves and paints a box tree into a display list
//!
//! The painter walks the tree depth-first. For every box it first fixes
//! the content rectangle, then emits the box's own commands, then
//! descends. A stack paints the fill and outline of each child's outer
//! rectangle immediately before that child draws itself.

use crate::dimension::Unit;
use crate::edges::Borders;
use crate::environment::Environment;
use crate::geometry::Rect;
use crate::paragraph::Paragraph;
use crate::text::{FontMetrics, TextBox};
use crate::tree::{BoxId, BoxKind, BoxTree};

use super::{DisplayCommand, DisplayList};

/// Width of child outlines.
const BORDER_WIDTH: Unit = Unit::point(1.0);

/// Painter that generates a display list from a box tree.
pub struct Painter<'a> {
    tree: &'a mut BoxTree,
    env: &'a mut Environment,
    metrics: &'a dyn FontMetrics,
    display_list: DisplayList,
}

impl<'a> Painter<'a> {
    /// Create a painter drawing `tree` in `env`, measuring text with `metrics`.
    #[must_use]
    pub fn new(
        tree: &'a mut BoxTree,
        env: &'a mut Environment,
        metrics: &'a dyn FontMetrics,
    ) -> Self {
        Self {
            tree,
            env,
            metrics,
            display_list: DisplayList::new(),
        }
    }

    /// Draw `root` and everything beneath it, and return the display list.
    #[must_use]
    pub fn paint(mut self, root: BoxId) -> DisplayList {
        self.draw(root);
        self.display_list
    }

    /// Draw one box with it pushed as the active box.
    fn draw(&mut self, id: BoxId) {
        self.env.push(id);
        self.draw_box(id);
        let _ = self.env.pop();
    }

    fn draw_box(&mut self, id: BoxId) {
        let Some(content) = self.tree.fix_content_bounds(id, self.env) else {
            return;
        };
        let Some(node) = self.tree.get(id) else {
            return;
        };

        match node.kind() {
            BoxKind::Plain => {}
            BoxKind::Text(text) => {
                let commands = self.layout_text(text, content);
                self.display_list.extend(commands);
            }
            BoxKind::Page { content: stack } => {
                let stack = stack.id();
                self.draw(stack);
            }
            BoxKind::Stack(stack) | BoxKind::Table(stack) => {
                let border_color = stack.border_color();
                let layouts = stack.layouts().to_vec();
                let line_width = BORDER_WIDTH.pixels(self.env.dpi());

                for layout in layouts {
                    // Children left out by distribution are not drawn.
                    let Some(bounds) = self.tree.bounds(layout.child) else {
                        continue;
                    };
                    if let Some(fill) = layout.fill_color {
                        self.display_list.push(DisplayCommand::fill(bounds, fill));
                    }
                    if layout.borders == Borders::all() {
                        self.display_list
                            .push(DisplayCommand::stroke(bounds, border_color, line_width));
                    }
                    self.draw(layout.child);
                }
            }
        }
    }

    fn layout_text(&self, text: &TextBox, content: Rect) -> Vec<DisplayCommand> {
        let styled = text.content.to_styled();
        let paragraph = Paragraph::new(&styled, self.metrics, self.env.dpi());
        let natural = paragraph.measure(content.width);
        let rect = text.text_rect(content, natural);
        paragraph.layout(rect, self.env.writing_direction())
    }
}
