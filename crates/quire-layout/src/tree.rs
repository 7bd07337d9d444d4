//! The box tree.
//!
//! Boxes live in an arena owned by [`BoxTree`] and refer to each other by
//! [`BoxId`]. Ownership only runs from a stack (or page) to its children;
//! the parent link stored on every node is a plain index.
//!
//! # Bounds protocol
//!
//! Every render pass resolves geometry in two phases per box:
//!
//! 1. the parent calls [`BoxTree::assign_outer_bounds`] on the child while
//!    distributing its own content rectangle (the environment does this
//!    for roots);
//! 2. the box itself runs [`BoxTree::fix_content_bounds`], which insets
//!    the outer rectangle by the resolved padding and, for stacks and
//!    pages, assigns the outer bounds of the children in turn.
//!
//! A box whose parent never placed it keeps `content_bounds == None` and
//! draws nothing.

use std::fmt;

use quire_common::warning::warn_once;
use serde::Serialize;

use crate::color::Color;
use crate::dimension::{Paddings, Size};
use crate::edges::{Borders, Edges};
use crate::environment::Environment;
use crate::error::TreeError;
use crate::geometry::Rect;
use crate::stack::{ChildLayout, Direction, Stack, distribute};
use crate::text::TextBox;

/// Index of a box in its [`BoxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoxId(pub usize);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a box known to be a stack (or table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackId(BoxId);

impl StackId {
    /// The underlying box.
    #[must_use]
    pub const fn id(self) -> BoxId {
        self.0
    }
}

impl From<StackId> for BoxId {
    fn from(stack: StackId) -> Self {
        stack.0
    }
}

/// Handle to a page box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(BoxId);

impl PageId {
    /// The underlying box.
    #[must_use]
    pub const fn id(self) -> BoxId {
        self.0
    }
}

impl From<PageId> for BoxId {
    fn from(page: PageId) -> Self {
        page.0
    }
}

/// What a box is, and the state specific to that kind.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxKind {
    /// A container with no children and nothing to draw.
    Plain,
    /// Distributes its content rectangle among ordered children.
    Stack(Stack),
    /// A stack whose children are always outlined on every edge.
    Table(Stack),
    /// A leaf drawing one run of text.
    Text(TextBox),
    /// A page root; its single child fills the page's content rectangle.
    Page {
        /// The page's root stack.
        content: StackId,
    },
}

impl BoxKind {
    /// The stack state, for stacks and tables.
    #[must_use]
    pub const fn as_stack(&self) -> Option<&Stack> {
        match self {
            Self::Stack(stack) | Self::Table(stack) => Some(stack),
            _ => None,
        }
    }

    const fn as_stack_mut(&mut self) -> Option<&mut Stack> {
        match self {
            Self::Stack(stack) | Self::Table(stack) => Some(stack),
            _ => None,
        }
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Plain => "box",
            Self::Stack(_) => "stack",
            Self::Table(_) => "table",
            Self::Text(_) => "text",
            Self::Page { .. } => "page",
        }
    }
}

/// A node in the box tree.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<BoxId>,
    size: Size,
    padding: Paddings,
    bounds: Option<Rect>,
    content_bounds: Option<Rect>,
    needs_layout: bool,
    kind: BoxKind,
}

impl Node {
    /// The stack or page this box belongs to.
    #[must_use]
    pub const fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    /// Requested size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Requested padding.
    #[must_use]
    pub const fn padding(&self) -> Paddings {
        self.padding
    }

    /// Outer rectangle assigned by the parent in the current pass.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Outer rectangle inset by padding, once resolved.
    #[must_use]
    pub const fn content_bounds(&self) -> Option<Rect> {
        self.content_bounds
    }

    /// Whether size or padding changed since the last resolution.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Kind-specific state.
    #[must_use]
    pub const fn kind(&self) -> &BoxKind {
        &self.kind
    }
}

/// Arena of boxes.
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
    nodes: Vec<Node>,
}

impl BoxTree {
    /// An empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of boxes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no boxes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: BoxId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::UnknownBox(id))
    }

    fn alloc(&mut self, size: Size, kind: BoxKind) -> BoxId {
        let id = BoxId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            size,
            padding: Paddings::ZERO,
            bounds: None,
            content_bounds: None,
            needs_layout: true,
            kind,
        });
        id
    }

    /// A plain box.
    pub fn new_box(&mut self, size: Size) -> BoxId {
        self.alloc(size, BoxKind::Plain)
    }

    /// An empty stack.
    pub fn new_stack(&mut self, direction: Direction, size: Size) -> StackId {
        StackId(self.alloc(size, BoxKind::Stack(Stack::new(direction))))
    }

    /// An empty table.
    pub fn new_table(&mut self, direction: Direction, size: Size) -> StackId {
        StackId(self.alloc(size, BoxKind::Table(Stack::new(direction))))
    }

    /// A table laying its cells out horizontally.
    pub fn new_row(&mut self, size: Size) -> StackId {
        self.new_table(Direction::Horizontal, size)
    }

    /// A table laying its cells out vertically.
    pub fn new_column(&mut self, size: Size) -> StackId {
        self.new_table(Direction::Vertical, size)
    }

    /// A text leaf.
    pub fn new_text(&mut self, text: TextBox, size: Size) -> BoxId {
        self.alloc(size, BoxKind::Text(text))
    }

    /// A page together with its vertical root stack.
    pub fn new_page(&mut self) -> PageId {
        let content = self.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
        let page = self.alloc(Size::PARENT_CONTENT, BoxKind::Page { content });
        self.nodes[content.0.0].parent = Some(page);
        PageId(page)
    }

    /// Append `child` to `stack`, growing from the start of the stack's axis,
    /// or from its end when `from_end` is set.
    ///
    /// # Errors
    ///
    /// Fails when either box is not in this tree, when `child` already has
    /// a parent, or when `child` is `stack` or one of its ancestors.
    pub fn add(
        &mut self,
        stack: StackId,
        child: BoxId,
        borders: Borders,
        fill_color: Option<Color>,
        from_end: bool,
    ) -> Result<(), TreeError> {
        let direction = self
            .stack(stack)
            .ok_or(TreeError::UnknownBox(stack.id()))?
            .direction();
        self.attach(stack, child, Stack::anchors_for(direction, from_end), borders, fill_color)
    }

    /// Append `child` anchored on every edge so it takes all the space left
    /// when its turn comes. Normally the last child of the stack.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BoxTree::add`].
    pub fn fill(
        &mut self,
        stack: StackId,
        child: BoxId,
        borders: Borders,
        fill_color: Option<Color>,
    ) -> Result<(), TreeError> {
        self.attach(stack, child, Edges::all(), borders, fill_color)
    }

    fn attach(
        &mut self,
        stack: StackId,
        child: BoxId,
        anchors: Edges,
        borders: Borders,
        fill_color: Option<Color>,
    ) -> Result<(), TreeError> {
        let parent = stack.id();
        let child_node = self.get(child).ok_or(TreeError::UnknownBox(child))?;
        if child_node.parent.is_some() {
            return Err(TreeError::AlreadyAttached { child });
        }
        if child == parent || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        let node = self.get_mut(parent)?;
        let borders = match node.kind {
            BoxKind::Table(_) => Borders::all(),
            _ => borders,
        };
        let layout = ChildLayout {
            child,
            anchors,
            borders,
            fill_color,
        };
        node.kind
            .as_stack_mut()
            .ok_or(TreeError::UnknownBox(parent))?
            .push(layout);
        node.needs_layout = true;
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Change a box's requested size and mark it for layout.
    ///
    /// # Errors
    ///
    /// Fails when `id` is not in this tree.
    pub fn set_size(&mut self, id: BoxId, size: Size) -> Result<(), TreeError> {
        let node = self.get_mut(id)?;
        node.size = size;
        node.needs_layout = true;
        Ok(())
    }

    /// Change a box's padding and mark it for layout.
    ///
    /// # Errors
    ///
    /// Fails when `id` is not in this tree.
    pub fn set_padding(&mut self, id: BoxId, padding: Paddings) -> Result<(), TreeError> {
        let node = self.get_mut(id)?;
        node.padding = padding;
        node.needs_layout = true;
        Ok(())
    }

    /// Color used for the outlines a stack strokes around its children.
    ///
    /// # Errors
    ///
    /// Fails when `stack` is not in this tree.
    pub fn set_border_color(&mut self, stack: StackId, color: Color) -> Result<(), TreeError> {
        self.get_mut(stack.id())?
            .kind
            .as_stack_mut()
            .ok_or(TreeError::UnknownBox(stack.id()))?
            .set_border_color(color);
        Ok(())
    }

    /// Stack state of a stack or table.
    #[must_use]
    pub fn stack(&self, stack: StackId) -> Option<&Stack> {
        self.get(stack.id()).and_then(|node| node.kind.as_stack())
    }

    /// Root stack of a page.
    #[must_use]
    pub fn page_content(&self, page: PageId) -> Option<StackId> {
        match self.get(page.id())?.kind {
            BoxKind::Page { content } => Some(content),
            _ => None,
        }
    }

    /// Get the parent of a box.
    #[must_use]
    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Children in distribution order. Only stacks and pages have any.
    #[must_use]
    pub fn children(&self, id: BoxId) -> Vec<BoxId> {
        match self.get(id).map(|node| &node.kind) {
            Some(BoxKind::Stack(stack) | BoxKind::Table(stack)) => {
                stack.layouts().iter().map(|layout| layout.child).collect()
            }
            Some(BoxKind::Page { content }) => vec![content.id()],
            _ => Vec::new(),
        }
    }

    /// Iterate over all ancestors of a box, from parent to root.
    pub fn ancestors(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        std::iter::successors(self.parent(id), |&ancestor| self.parent(ancestor))
    }

    /// Requested size, or zero for an unknown box.
    #[must_use]
    pub fn size(&self, id: BoxId) -> Size {
        self.get(id).map_or(Size::ZERO, Node::size)
    }

    /// Outer rectangle of the current pass.
    #[must_use]
    pub fn bounds(&self, id: BoxId) -> Option<Rect> {
        self.get(id).and_then(Node::bounds)
    }

    /// Content rectangle of the current pass.
    #[must_use]
    pub fn content_bounds(&self, id: BoxId) -> Option<Rect> {
        self.get(id).and_then(Node::content_bounds)
    }

    /// Whether the box changed since it was last resolved.
    #[must_use]
    pub fn needs_layout(&self, id: BoxId) -> bool {
        self.get(id).is_some_and(Node::needs_layout)
    }

    /// Set the outer rectangle of a box. Any content rectangle derived from
    /// a previous assignment is discarded.
    pub fn assign_outer_bounds(&mut self, id: BoxId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.bounds = Some(rect);
            node.content_bounds = None;
        }
    }

    fn clear_bounds(&mut self, id: BoxId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.bounds = None;
            node.content_bounds = None;
        }
    }

    /// Forget the resolved geometry of `id` and its whole subtree.
    pub fn invalidate(&mut self, id: BoxId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            self.clear_bounds(id);
            pending.extend(self.children(id));
        }
    }

    /// Resolve the content rectangle of `id`.
    ///
    /// The parent is resolved first if it has not been yet; a root takes
    /// its outer rectangle from the environment. Stacks then distribute
    /// the new content rectangle among their children, and pages hand it
    /// to their root stack.
    ///
    /// Returns `None`, after logging, when no outer rectangle was assigned.
    pub fn fix_content_bounds(&mut self, id: BoxId, env: &Environment) -> Option<Rect> {
        let node = self.get(id)?;
        match node.parent {
            Some(parent) => {
                if self.content_bounds(parent).is_none() {
                    let _ = self.fix_content_bounds(parent, env);
                }
            }
            None => self.assign_outer_bounds(id, env.content_bounds()),
        }

        let node = self.get(id)?;
        let Some(bounds) = node.bounds else {
            let _ = warn_once(
                "layout",
                &format!("{} {id} was not placed by its parent; skipping it", node.kind.name()),
            );
            return None;
        };

        let (padding, unresolved) = node.padding.resolve(bounds.size(), env.dpi());
        if !unresolved.is_empty() {
            let _ = warn_once(
                "layout",
                &format!(
                    "{} {id}: padding on {} has no fixed value, using zero",
                    node.kind.name(),
                    unresolved.join(", ")
                ),
            );
        }
        let content = bounds.inset(padding);

        let node = &mut self.nodes[id.0];
        node.content_bounds = Some(content);
        node.needs_layout = false;

        match node.kind {
            BoxKind::Stack(_) | BoxKind::Table(_) => self.distribute_children(id, content, env),
            BoxKind::Page { content: stack } => self.assign_outer_bounds(stack.id(), content),
            BoxKind::Plain | BoxKind::Text(_) => {}
        }
        Some(content)
    }

    fn distribute_children(&mut self, id: BoxId, content: Rect, env: &Environment) {
        for child in self.children(id) {
            self.clear_bounds(child);
        }
        let Some(stack) = self.get(id).and_then(|node| node.kind.as_stack()) else {
            return;
        };
        let placed = distribute(
            stack.layouts(),
            |child| self.size(child),
            content,
            stack.direction(),
            env.writing_direction(),
            env.dpi(),
        );
        for (child, rect) in placed {
            self.assign_outer_bounds(child, rect);
        }
    }
}
