//! Integration tests for stack distribution.

use quire_layout::stack::distribute;
use quire_layout::{
    Borders, BoxId, BoxTree, ChildLayout, Direction, Edges, Environment, Length, Paddings, Rect,
    Size, StackId, WritingDirection,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn assert_rect(actual: Option<Rect>, expected: Rect) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected:?}, box was not placed"));
    assert!(
        approx(actual.x, expected.x)
            && approx(actual.y, expected.y)
            && approx(actual.width, expected.width)
            && approx(actual.height, expected.height),
        "expected {expected:?}, got {actual:?}"
    );
}

/// A 200×100 point page at 72 dpi.
fn env() -> Environment {
    Environment::new(Size::new(Length::points(200.0), Length::points(100.0)))
}

fn tall(tree: &mut BoxTree, height: f32) -> BoxId {
    tree.new_box(Size::new(Length::Relative(1.0), Length::points(height)))
}

fn wide(tree: &mut BoxTree, width: f32) -> BoxId {
    tree.new_box(Size::new(Length::points(width), Length::Relative(1.0)))
}

fn root_stack(tree: &mut BoxTree, direction: Direction) -> StackId {
    tree.new_stack(direction, Size::PARENT_CONTENT)
}

#[test]
fn test_vertical_children_follow_each_other() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let first = tall(&mut tree, 30.0);
    let second = tall(&mut tree, 20.0);
    tree.add(stack, first, Borders::empty(), None, false).unwrap();
    tree.add(stack, second, Borders::empty(), None, false).unwrap();

    let content = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(content, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_rect(tree.bounds(first), Rect::new(0.0, 0.0, 200.0, 30.0));
    assert_rect(tree.bounds(second), Rect::new(0.0, 30.0, 200.0, 20.0));
}

#[test]
fn test_oversized_child_is_clamped_to_remaining_space() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let first = tall(&mut tree, 40.0);
    let second = tall(&mut tree, 500.0);
    let third = tall(&mut tree, 10.0);
    tree.add(stack, first, Borders::empty(), None, false).unwrap();
    tree.add(stack, second, Borders::empty(), None, false).unwrap();
    tree.add(stack, third, Borders::empty(), None, false).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(second), Rect::new(0.0, 40.0, 200.0, 60.0));
    assert_rect(tree.bounds(third), Rect::new(0.0, 100.0, 200.0, 0.0));
}

#[test]
fn test_bottom_anchor_uses_current_remaining_rect() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let footer = tall(&mut tree, 20.0);
    let above_footer = tall(&mut tree, 15.0);
    tree.add(stack, footer, Borders::empty(), None, true).unwrap();
    tree.add(stack, above_footer, Borders::empty(), None, true).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(footer), Rect::new(0.0, 80.0, 200.0, 20.0));
    assert_rect(tree.bounds(above_footer), Rect::new(0.0, 65.0, 200.0, 15.0));
}

#[test]
fn test_bottom_anchor_after_top_child() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let header = tall(&mut tree, 30.0);
    let footer = tall(&mut tree, 20.0);
    tree.add(stack, header, Borders::empty(), None, false).unwrap();
    tree.add(stack, footer, Borders::empty(), None, true).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(header), Rect::new(0.0, 0.0, 200.0, 30.0));
    assert_rect(tree.bounds(footer), Rect::new(0.0, 80.0, 200.0, 20.0));
}

#[test]
fn test_fill_takes_entire_remaining_rect() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let header = tall(&mut tree, 30.0);
    let footer = tall(&mut tree, 20.0);
    let body = tree.new_box(Size::ZERO);
    tree.add(stack, header, Borders::empty(), None, false).unwrap();
    tree.add(stack, footer, Borders::empty(), None, true).unwrap();
    tree.fill(stack, body, Borders::empty(), None).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(body), Rect::new(0.0, 30.0, 200.0, 50.0));
}

#[test]
fn test_fill_is_greedy() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let body = tree.new_box(Size::ZERO);
    let late = tall(&mut tree, 10.0);
    tree.fill(stack, body, Borders::empty(), None).unwrap();
    tree.add(stack, late, Borders::empty(), None, false).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(body), Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_rect(tree.bounds(late), Rect::new(0.0, 100.0, 200.0, 0.0));
}

#[test]
fn test_negative_request_is_clamped_to_zero() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let negative = tree.new_box(Size::new(Length::Relative(1.0), Length::Relative(-0.5)));
    let body = tree.new_box(Size::ZERO);
    tree.add(stack, negative, Borders::empty(), None, false).unwrap();
    tree.fill(stack, body, Borders::empty(), None).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(negative), Rect::new(0.0, 0.0, 200.0, 0.0));
    assert_rect(tree.bounds(body), Rect::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_negative_request_from_end_stays_inside() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Horizontal);
    let negative = wide(&mut tree, -40.0);
    let body = tree.new_box(Size::ZERO);
    tree.add(stack, negative, Borders::empty(), None, true).unwrap();
    tree.fill(stack, body, Borders::empty(), None).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(negative), Rect::new(200.0, 0.0, 0.0, 100.0));
    assert_rect(tree.bounds(body), Rect::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_unresolved_main_length_skips_child() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let flexible = tree.new_box(Size::new(Length::Relative(1.0), Length::Flexible));
    let proportional = tree.new_box(Size::new(Length::Relative(1.0), Length::Proportional(2.0)));
    let fixed = tall(&mut tree, 25.0);
    tree.add(stack, flexible, Borders::empty(), None, false).unwrap();
    tree.add(stack, proportional, Borders::empty(), None, false).unwrap();
    tree.add(stack, fixed, Borders::empty(), None, false).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_eq!(tree.bounds(flexible), None);
    assert_eq!(tree.bounds(proportional), None);
    assert_rect(tree.bounds(fixed), Rect::new(0.0, 0.0, 200.0, 25.0));
}

#[test]
fn test_unplaced_child_has_no_content_bounds() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let flexible = tree.new_box(Size::new(Length::Relative(1.0), Length::Flexible));
    tree.add(stack, flexible, Borders::empty(), None, false).unwrap();

    let env = env();
    let _ = tree.fix_content_bounds(stack.id(), &env);
    assert_eq!(tree.fix_content_bounds(flexible, &env), None);
    assert_eq!(tree.content_bounds(flexible), None);
}

#[test]
fn test_relative_height_resolves_against_stack_content() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let quarter = tree.new_box(Size::new(Length::Relative(1.0), Length::Relative(0.25)));
    tree.add(stack, quarter, Borders::empty(), None, false).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(quarter), Rect::new(0.0, 0.0, 200.0, 25.0));
}

#[test]
fn test_stack_padding_insets_children() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    tree.set_padding(stack.id(), Paddings::uniform(Length::points(10.0)))
        .unwrap();
    let child = tall(&mut tree, 30.0);
    tree.add(stack, child, Borders::empty(), None, false).unwrap();

    let content = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(content, Rect::new(10.0, 10.0, 180.0, 80.0));
    assert_rect(tree.bounds(child), Rect::new(10.0, 10.0, 180.0, 30.0));
}

#[test]
fn test_horizontal_left_to_right() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Horizontal);
    let first = wide(&mut tree, 50.0);
    let second = wide(&mut tree, 30.0);
    let last = wide(&mut tree, 40.0);
    tree.add(stack, first, Borders::empty(), None, false).unwrap();
    tree.add(stack, second, Borders::empty(), None, false).unwrap();
    tree.add(stack, last, Borders::empty(), None, true).unwrap();

    let _ = tree.fix_content_bounds(stack.id(), &env());
    assert_rect(tree.bounds(first), Rect::new(0.0, 0.0, 50.0, 100.0));
    assert_rect(tree.bounds(second), Rect::new(50.0, 0.0, 30.0, 100.0));
    assert_rect(tree.bounds(last), Rect::new(160.0, 0.0, 40.0, 100.0));
}

#[test]
fn test_horizontal_right_to_left_swaps_edges() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Horizontal);
    let first = wide(&mut tree, 50.0);
    let last = wide(&mut tree, 40.0);
    tree.add(stack, first, Borders::empty(), None, false).unwrap();
    tree.add(stack, last, Borders::empty(), None, true).unwrap();

    let env = env().with_writing_direction(WritingDirection::RightToLeft);
    let _ = tree.fix_content_bounds(stack.id(), &env);
    assert_rect(tree.bounds(first), Rect::new(150.0, 0.0, 50.0, 100.0));
    assert_rect(tree.bounds(last), Rect::new(0.0, 0.0, 40.0, 100.0));
}

#[test]
fn test_vertical_ignores_writing_direction() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let first = tall(&mut tree, 30.0);
    tree.add(stack, first, Borders::empty(), None, false).unwrap();

    let env = env().with_writing_direction(WritingDirection::RightToLeft);
    let _ = tree.fix_content_bounds(stack.id(), &env);
    assert_rect(tree.bounds(first), Rect::new(0.0, 0.0, 200.0, 30.0));
}

#[test]
fn test_distribute_skips_partial_cross_axis_anchors() {
    let content = Rect::new(0.0, 0.0, 100.0, 100.0);
    let size = |_: BoxId| Size::new(Length::Relative(1.0), Length::points(10.0));
    let layouts = [
        ChildLayout {
            anchors: Edges::TOP | Edges::LEADING,
            ..ChildLayout::new(BoxId(1))
        },
        ChildLayout::new(BoxId(2)),
    ];

    let placed = distribute(
        &layouts,
        size,
        content,
        Direction::Vertical,
        WritingDirection::LeftToRight,
        72.0,
    );
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].0, BoxId(2));
    assert!(approx(placed[0].1.y, 0.0));
}

#[test]
fn test_distribute_skips_child_without_main_axis_anchor() {
    let content = Rect::new(0.0, 0.0, 100.0, 100.0);
    let size = |_: BoxId| Size::new(Length::Relative(1.0), Length::points(10.0));
    let layouts = [
        ChildLayout {
            anchors: Edges::HORIZONTAL,
            ..ChildLayout::new(BoxId(1))
        },
        ChildLayout::new(BoxId(2)),
    ];

    let placed = distribute(
        &layouts,
        size,
        content,
        Direction::Vertical,
        WritingDirection::LeftToRight,
        72.0,
    );
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].0, BoxId(2));
}

#[test]
fn test_distribute_horizontal_needs_vertical_anchors() {
    let content = Rect::new(0.0, 0.0, 100.0, 100.0);
    let size = |_: BoxId| Size::new(Length::points(10.0), Length::Relative(1.0));
    let layouts = [ChildLayout::new(BoxId(1))];

    let placed = distribute(
        &layouts,
        size,
        content,
        Direction::Horizontal,
        WritingDirection::LeftToRight,
        72.0,
    );
    assert!(placed.is_empty());
}

#[test]
fn test_redistribution_clears_stale_bounds() {
    let mut tree = BoxTree::new();
    let stack = root_stack(&mut tree, Direction::Vertical);
    let child = tall(&mut tree, 30.0);
    tree.add(stack, child, Borders::empty(), None, false).unwrap();

    let env = env();
    let _ = tree.fix_content_bounds(stack.id(), &env);
    assert!(tree.bounds(child).is_some());

    tree.set_size(child, Size::new(Length::Relative(1.0), Length::Flexible))
        .unwrap();
    let _ = tree.fix_content_bounds(stack.id(), &env);
    assert_eq!(tree.bounds(child), None);
}
