//! Integration tests for the box arena: attachment rules, the dirty flag
//! and the two-phase bounds protocol.

use quire_layout::{
    Borders, BoxId, BoxKind, BoxTree, Direction, Environment, Length, Paddings, Rect, Size,
    TextBox, TreeError,
};

fn env() -> Environment {
    Environment::new(Size::new(Length::points(200.0), Length::points(100.0)))
}

#[test]
fn test_add_sets_parent_and_children() {
    let mut tree = BoxTree::new();
    let stack = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let a = tree.new_box(Size::ZERO);
    let b = tree.new_text(TextBox::plain("b"), Size::ZERO);
    tree.add(stack, a, Borders::empty(), None, false).unwrap();
    tree.fill(stack, b, Borders::empty(), None).unwrap();

    assert_eq!(tree.parent(a), Some(stack.id()));
    assert_eq!(tree.parent(b), Some(stack.id()));
    assert_eq!(tree.children(stack.id()), vec![a, b]);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_attaching_twice_fails() {
    let mut tree = BoxTree::new();
    let first = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let second = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let child = tree.new_box(Size::ZERO);
    tree.add(first, child, Borders::empty(), None, false).unwrap();

    let result = tree.add(second, child, Borders::empty(), None, false);
    assert_eq!(result, Err(TreeError::AlreadyAttached { child }));
    assert!(tree.children(second.id()).is_empty());
    assert_eq!(tree.parent(child), Some(first.id()));
}

#[test]
fn test_adding_stack_to_itself_fails() {
    let mut tree = BoxTree::new();
    let stack = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let result = tree.fill(stack, stack.id(), Borders::empty(), None);
    assert_eq!(
        result,
        Err(TreeError::WouldCycle {
            parent: stack.id(),
            child: stack.id()
        })
    );
}

#[test]
fn test_adding_ancestor_under_descendant_fails() {
    let mut tree = BoxTree::new();
    let outer = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let inner = tree.new_stack(Direction::Horizontal, Size::PARENT_CONTENT);
    tree.fill(outer, inner.id(), Borders::empty(), None).unwrap();

    let result = tree.fill(inner, outer.id(), Borders::empty(), None);
    assert_eq!(
        result,
        Err(TreeError::WouldCycle {
            parent: inner.id(),
            child: outer.id()
        })
    );
    assert!(tree.children(inner.id()).is_empty());
    assert_eq!(tree.parent(outer.id()), None);
}

#[test]
fn test_unknown_box_is_rejected() {
    let mut tree = BoxTree::new();
    let stack = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let missing = BoxId(42);
    assert_eq!(
        tree.add(stack, missing, Borders::empty(), None, false),
        Err(TreeError::UnknownBox(missing))
    );
    assert_eq!(
        tree.set_size(missing, Size::ZERO),
        Err(TreeError::UnknownBox(missing))
    );
}

#[test]
fn test_tree_error_messages() {
    let error = TreeError::WouldCycle {
        parent: BoxId(1),
        child: BoxId(2),
    };
    assert_eq!(error.to_string(), "adding box #2 to #1 would create a cycle");
    assert_eq!(
        TreeError::AlreadyAttached { child: BoxId(3) }.to_string(),
        "box #3 already has a parent"
    );
}

#[test]
fn test_dirty_flag_follows_changes() {
    let mut tree = BoxTree::new();
    let stack = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let child = tree.new_box(Size::new(Length::Relative(1.0), Length::points(10.0)));
    tree.add(stack, child, Borders::empty(), None, false).unwrap();
    assert!(tree.needs_layout(child));

    let env = env();
    let _ = tree.fix_content_bounds(child, &env);
    assert!(!tree.needs_layout(child));
    assert!(!tree.needs_layout(stack.id()));

    tree.set_size(child, Size::new(Length::Relative(1.0), Length::points(20.0)))
        .unwrap();
    assert!(tree.needs_layout(child));

    let _ = tree.fix_content_bounds(child, &env);
    assert!(!tree.needs_layout(child));

    tree.set_padding(child, Paddings::uniform(Length::points(1.0)))
        .unwrap();
    assert!(tree.needs_layout(child));
}

#[test]
fn test_resolution_walks_up_to_the_root() {
    let mut tree = BoxTree::new();
    let outer = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let inner = tree.new_stack(Direction::Vertical, Size::PARENT_CONTENT);
    let leaf = tree.new_box(Size::new(Length::Relative(1.0), Length::points(10.0)));
    tree.fill(outer, inner.id(), Borders::empty(), None).unwrap();
    tree.add(inner, leaf, Borders::empty(), None, false).unwrap();

    let content = tree.fix_content_bounds(leaf, &env()).unwrap();
    assert!((content.width - 200.0).abs() < 1e-3);
    assert!((content.height - 10.0).abs() < 1e-3);
    assert!(tree.content_bounds(outer.id()).is_some());
    assert!(tree.content_bounds(inner.id()).is_some());
}

#[test]
fn test_assigning_outer_bounds_discards_content() {
    let mut tree = BoxTree::new();
    let root = tree.new_box(Size::ZERO);
    let _ = tree.fix_content_bounds(root, &env());
    assert!(tree.content_bounds(root).is_some());

    tree.assign_outer_bounds(root, Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(tree.bounds(root), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(tree.content_bounds(root), None);
}

#[test]
fn test_invalidate_clears_subtree() {
    let mut tree = BoxTree::new();
    let page = tree.new_page();
    let content = tree.page_content(page).unwrap();
    let leaf = tree.new_box(Size::new(Length::Relative(1.0), Length::points(10.0)));
    tree.add(content, leaf, Borders::empty(), None, false).unwrap();

    let _ = tree.fix_content_bounds(leaf, &env());
    assert!(tree.bounds(leaf).is_some());

    tree.invalidate(page.id());
    for id in [page.id(), content.id(), leaf] {
        assert_eq!(tree.bounds(id), None);
        assert_eq!(tree.content_bounds(id), None);
    }
}

#[test]
fn test_page_owns_root_stack() {
    let mut tree = BoxTree::new();
    let page = tree.new_page();
    let content = tree.page_content(page).unwrap();
    assert_eq!(tree.parent(content.id()), Some(page.id()));
    assert_eq!(tree.children(page.id()), vec![content.id()]);
    assert!(matches!(
        tree.get(page.id()).map(|node| node.kind()),
        Some(BoxKind::Page { .. })
    ));
    assert_eq!(tree.ancestors(content.id()).collect::<Vec<_>>(), vec![page.id()]);
}

#[test]
fn test_unparented_box_uses_environment_geometry() {
    let mut tree = BoxTree::new();
    let root = tree.new_box(Size::ZERO);
    tree.set_padding(root, Paddings::uniform(Length::Relative(0.1)))
        .unwrap();

    let content = tree.fix_content_bounds(root, &env()).unwrap();
    assert!((content.x - 20.0).abs() < 1e-3);
    assert!((content.y - 10.0).abs() < 1e-3);
    assert!((content.width - 160.0).abs() < 1e-3);
    assert!((content.height - 80.0).abs() < 1e-3);
}
