//! JSON document manifests.
//!
//! A manifest describes the page geometry and, for every page, a tree of
//! boxes. Dimension and style values use the serde forms of the layout
//! types, so a manifest reads like the builder calls it turns into:
//!
//! ```json
//! {
//!   "page_size": "a4-portrait",
//!   "dpi": 150,
//!   "pages": [{
//!     "padding": { "top": { "absolute": { "millimeter": 20 } } },
//!     "content": [
//!       { "type": "text", "content": { "plain": { "text": "Title" } },
//!         "size": { "width": { "relative": 1 }, "height": { "absolute": { "point": 24 } } } },
//!       { "type": "box", "fill": true, "borders": "TOP | BOTTOM | LEADING | TRAILING" }
//!     ]
//!   }]
//! }
//! ```

use quire_layout::{
    Borders, BoxId, BoxTree, Color, Direction, Environment, PageId, Paddings, Size, StackId,
    TextBox, TextContent, TreeError, VerticalAlignment, WritingDirection,
};
use serde::Deserialize;

/// A whole document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Size of every page.
    #[serde(default)]
    pub page_size: PageSize,
    /// Output resolution in dots per inch.
    #[serde(default)]
    pub dpi: Option<f32>,
    /// Direction lines progress in.
    #[serde(default)]
    pub writing_direction: WritingDirection,
    /// Pages in document order.
    pub pages: Vec<PageSpec>,
}

/// A page size, by name or explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageSize {
    /// One of the common paper sizes.
    Named(NamedSize),
    /// Any absolute size.
    Explicit(Size),
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Named(NamedSize::A4Portrait)
    }
}

impl PageSize {
    /// The size as a layout value.
    #[must_use]
    pub const fn size(self) -> Size {
        match self {
            Self::Named(NamedSize::A4Portrait) => Size::A4_PORTRAIT,
            Self::Named(NamedSize::A4Landscape) => Size::A4_LANDSCAPE,
            Self::Named(NamedSize::A5Portrait) => Size::A5_PORTRAIT,
            Self::Named(NamedSize::LetterPortrait) => Size::LETTER_PORTRAIT,
            Self::Explicit(size) => size,
        }
    }
}

/// Paper sizes accepted by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedSize {
    /// ISO A4, portrait.
    A4Portrait,
    /// ISO A4, landscape.
    A4Landscape,
    /// ISO A5, portrait.
    A5Portrait,
    /// US Letter, portrait.
    LetterPortrait,
}

/// One page and the boxes of its root stack.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSpec {
    /// Margins between the page edge and its content.
    pub padding: Paddings,
    /// Color of the root stack's borders.
    pub border_color: Option<Color>,
    /// Children of the root vertical stack.
    pub content: Vec<Entry>,
}

/// A box together with how its parent stack holds it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    /// What kind of box this is.
    #[serde(flatten)]
    pub node: NodeSpec,
    /// Requested size.
    #[serde(default)]
    pub size: Size,
    /// Padding inside the box.
    #[serde(default)]
    pub padding: Paddings,
    /// Edges of the box to stroke.
    #[serde(default)]
    pub borders: Borders,
    /// Fill drawn behind the box.
    #[serde(default)]
    pub fill_color: Option<Color>,
    /// Anchor to every edge, taking all remaining space.
    #[serde(default)]
    pub fill: bool,
    /// Grow from the trailing end of the stack.
    #[serde(default)]
    pub from_end: bool,
}

/// The kinds of box a manifest can create.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeSpec {
    /// An empty box.
    Box,
    /// A text leaf.
    Text {
        /// What to draw.
        content: TextContent,
        /// Placement within the box.
        #[serde(default)]
        vertical_alignment: VerticalAlignment,
    },
    /// A stack along either axis.
    Stack {
        /// Distribution axis.
        #[serde(default)]
        direction: Direction,
        /// Color of stroked child borders.
        #[serde(default)]
        border_color: Option<Color>,
        /// Children in stack order.
        #[serde(default)]
        children: Vec<Entry>,
    },
    /// A stack whose children are always fully bordered.
    Table {
        /// Distribution axis.
        #[serde(default)]
        direction: Direction,
        /// Color of the cell borders.
        #[serde(default)]
        border_color: Option<Color>,
        /// Cells in order.
        #[serde(default)]
        children: Vec<Entry>,
    },
    /// A horizontal table.
    Row {
        /// Color of the cell borders.
        #[serde(default)]
        border_color: Option<Color>,
        /// Cells from the leading edge.
        #[serde(default)]
        children: Vec<Entry>,
    },
    /// A vertical table.
    Column {
        /// Color of the cell borders.
        #[serde(default)]
        border_color: Option<Color>,
        /// Cells from the top.
        #[serde(default)]
        children: Vec<Entry>,
    },
}

/// A manifest turned into a box tree.
#[derive(Debug)]
pub struct Document {
    /// Every box of every page.
    pub tree: BoxTree,
    /// Pages in document order.
    pub pages: Vec<PageId>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest or if `dpi`
    /// is not a positive number.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let manifest: Self = serde_json::from_str(text)?;
        if let Some(dpi) = manifest.dpi
            && (!dpi.is_finite() || dpi <= 0.0)
        {
            return Err(serde::de::Error::custom(format_args!(
                "dpi must be positive, got {dpi}"
            )));
        }
        Ok(manifest)
    }

    /// The environment described by the manifest.
    #[must_use]
    pub fn environment(&self) -> Environment {
        let env = Environment::new(self.page_size.size())
            .with_writing_direction(self.writing_direction);
        match self.dpi {
            Some(dpi) => env.with_dpi(dpi),
            None => env,
        }
    }

    /// Build the box tree of every page.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree rejects an edit.
    pub fn build(&self) -> Result<Document, TreeError> {
        let mut tree = BoxTree::new();
        let mut pages = Vec::with_capacity(self.pages.len());
        for spec in &self.pages {
            let page = tree.new_page();
            tree.set_padding(page.id(), spec.padding)?;
            let content = tree
                .page_content(page)
                .ok_or(TreeError::UnknownBox(page.id()))?;
            attach_group(&mut tree, content, spec.border_color, &spec.content)?;
            pages.push(page);
        }
        log::debug!("built {} pages with {} boxes", pages.len(), tree.len());
        Ok(Document { tree, pages })
    }
}

fn attach_group(
    tree: &mut BoxTree,
    stack: StackId,
    border_color: Option<Color>,
    children: &[Entry],
) -> Result<(), TreeError> {
    if let Some(color) = border_color {
        tree.set_border_color(stack, color)?;
    }
    for entry in children {
        let child = build_entry(tree, entry)?;
        if entry.fill {
            tree.fill(stack, child, entry.borders, entry.fill_color)?;
        } else {
            tree.add(stack, child, entry.borders, entry.fill_color, entry.from_end)?;
        }
    }
    Ok(())
}

fn build_entry(tree: &mut BoxTree, entry: &Entry) -> Result<BoxId, TreeError> {
    let id = match &entry.node {
        NodeSpec::Box => tree.new_box(entry.size),
        NodeSpec::Text {
            content,
            vertical_alignment,
        } => tree.new_text(
            TextBox::new(content.clone()).aligned(*vertical_alignment),
            entry.size,
        ),
        NodeSpec::Stack {
            direction,
            border_color,
            children,
        } => {
            let stack = tree.new_stack(*direction, entry.size);
            attach_group(tree, stack, *border_color, children)?;
            stack.id()
        }
        NodeSpec::Table {
            direction,
            border_color,
            children,
        } => {
            let table = tree.new_table(*direction, entry.size);
            attach_group(tree, table, *border_color, children)?;
            table.id()
        }
        NodeSpec::Row {
            border_color,
            children,
        } => {
            let row = tree.new_row(entry.size);
            attach_group(tree, row, *border_color, children)?;
            row.id()
        }
        NodeSpec::Column {
            border_color,
            children,
        } => {
            let column = tree.new_column(entry.size);
            attach_group(tree, column, *border_color, children)?;
            column.id()
        }
    };
    tree.set_padding(id, entry.padding)?;
    Ok(id)
}
