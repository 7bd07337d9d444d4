//! Per-document render state and the multi-page render loop.

use quire_common::warning::clear_warnings;

use crate::dimension::{POINTS_PER_INCH, Size};
use crate::edges::Anchors;
use crate::encoder::DocumentEncoder;
use crate::geometry::Rect;
use crate::paint::{DisplayList, Painter};
use crate::text::FontMetrics;
use crate::tree::{BoxId, BoxTree, PageId};
use crate::writing_direction::WritingDirection;

/// Resolution, page geometry and writing direction of a document, plus
/// the state of the render pass in progress.
///
/// During a pass the environment tracks the page being drawn and the
/// path of boxes currently being drawn, innermost last.
#[derive(Debug, Clone)]
pub struct Environment {
    page_size: Size,
    dpi: f32,
    writing_direction: WritingDirection,
    current_page: Option<PageId>,
    box_path: Vec<BoxId>,
}

impl Environment {
    /// An environment for pages of `page_size` at 72 dpi, left to right.
    #[must_use]
    pub const fn new(page_size: Size) -> Self {
        Self {
            page_size,
            dpi: POINTS_PER_INCH,
            writing_direction: WritingDirection::LeftToRight,
            current_page: None,
            box_path: Vec::new(),
        }
    }

    /// Set the output resolution.
    #[must_use]
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the writing direction.
    #[must_use]
    pub fn with_writing_direction(mut self, writing_direction: WritingDirection) -> Self {
        self.writing_direction = writing_direction;
        self
    }

    /// Page size every page is rendered at.
    #[must_use]
    pub const fn page_size(&self) -> Size {
        self.page_size
    }

    /// Output resolution in dots per inch.
    #[must_use]
    pub const fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Writing direction of the document.
    #[must_use]
    pub const fn writing_direction(&self) -> WritingDirection {
        self.writing_direction
    }

    /// The anchor that maps to the physical left edge.
    #[must_use]
    pub const fn left_anchor(&self) -> Anchors {
        self.writing_direction.left_anchor()
    }

    /// The anchor that maps to the physical right edge.
    #[must_use]
    pub const fn right_anchor(&self) -> Anchors {
        self.writing_direction.right_anchor()
    }

    /// The page geometry at the output resolution. Tree roots take this
    /// as their outer rectangle.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        self.page_size.bounds(self.dpi)
    }

    /// The page being rendered, if a pass is in progress.
    #[must_use]
    pub const fn current_page(&self) -> Option<PageId> {
        self.current_page
    }

    /// Enter a box's draw.
    pub fn push(&mut self, id: BoxId) {
        self.box_path.push(id);
    }

    /// Leave the innermost box's draw.
    pub fn pop(&mut self) -> Option<BoxId> {
        self.box_path.pop()
    }

    /// The box currently being drawn.
    #[must_use]
    pub fn active_box(&self) -> Option<BoxId> {
        self.box_path.last().copied()
    }

    /// Boxes currently being drawn, outermost first.
    #[must_use]
    pub fn box_path(&self) -> &[BoxId] {
        &self.box_path
    }

    /// Resolve and paint a single page.
    ///
    /// Geometry left over from a previous pass is discarded first.
    pub fn paint_page(
        &mut self,
        tree: &mut BoxTree,
        page: PageId,
        metrics: &dyn FontMetrics,
    ) -> DisplayList {
        tree.invalidate(page.id());
        self.current_page = Some(page);
        Painter::new(tree, self, metrics).paint(page.id())
    }

    /// Render `pages` in order through `encoder` and return the finished
    /// document.
    ///
    /// Layout problems never abort the loop; every page supplied yields a
    /// page in the output.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the encoder.
    pub fn render_document<E: DocumentEncoder>(
        &mut self,
        tree: &mut BoxTree,
        pages: &[PageId],
        metrics: &dyn FontMetrics,
        mut encoder: E,
    ) -> Result<E::Output, E::Error> {
        clear_warnings();
        let page_size = self.content_bounds().size();

        for (index, &page) in pages.iter().enumerate() {
            log::debug!("rendering page {} of {}", index + 1, pages.len());
            encoder.begin_page(page_size, self.dpi)?;
            let display_list = self.paint_page(tree, page, metrics);
            for command in display_list.commands() {
                encoder.execute(command)?;
            }
        }

        self.current_page = None;
        encoder.finish()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Size::A4_PORTRAIT)
    }
}
