//! Integration tests for text boxes.

use quire_layout::{
    ApproximateFontMetrics, Borders, BoxTree, Color, DisplayCommand, Environment, Extent, Font,
    FontFace, Length, LineBreakMode, Painter, Rect, Size, StyledText, TextAlign, TextBox,
    TextContent, TextSpan, TextStyle, Unit, VerticalAlignment, WritingDirection,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// A 200×100 point page at 72 dpi.
fn env() -> Environment {
    Environment::new(Size::new(Length::points(200.0), Length::points(100.0)))
}

/// 10pt text: 6px per glyph, 12px per line with the approximate metrics.
fn style() -> TextStyle {
    TextStyle {
        font: Font::new(Unit::point(10.0)),
        ..TextStyle::default()
    }
}

fn draw(text: TextBox, env: &mut Environment) -> Vec<DisplayCommand> {
    let mut tree = BoxTree::new();
    let stack = tree.new_stack(quire_layout::Direction::Vertical, Size::PARENT_CONTENT);
    let leaf = tree.new_text(text, Size::ZERO);
    tree.fill(stack, leaf, Borders::empty(), None).unwrap();
    Painter::new(&mut tree, env, &ApproximateFontMetrics)
        .paint(stack.id())
        .commands()
        .to_vec()
}

fn text_origins(commands: &[DisplayCommand]) -> Vec<(String, f32, f32)> {
    commands
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText {
                text, x, baseline, ..
            } => Some((text.clone(), *x, *baseline)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_text_rect_alignment() {
    let content = Rect::new(0.0, 10.0, 100.0, 50.0);
    let natural = Extent::new(30.0, 10.0);

    let top = TextBox::plain("x").aligned(VerticalAlignment::Top);
    assert_eq!(top.text_rect(content, natural), Rect::new(0.0, 10.0, 100.0, 10.0));

    let middle = TextBox::plain("x");
    assert_eq!(middle.vertical_alignment, VerticalAlignment::Middle);
    assert_eq!(middle.text_rect(content, natural), Rect::new(0.0, 30.0, 100.0, 10.0));

    let bottom = TextBox::plain("x").aligned(VerticalAlignment::Bottom);
    assert_eq!(bottom.text_rect(content, natural), Rect::new(0.0, 50.0, 100.0, 10.0));
}

#[test]
fn test_tall_text_fills_content() {
    let content = Rect::new(5.0, 5.0, 100.0, 20.0);
    let text = TextBox::plain("x").aligned(VerticalAlignment::Bottom);
    assert_eq!(text.text_rect(content, Extent::new(10.0, 20.0)), content);
    assert_eq!(text.text_rect(content, Extent::new(10.0, 80.0)), content);
}

#[test]
fn test_default_style_truncates_tail() {
    let style = TextStyle::default();
    assert_eq!(style.line_break, LineBreakMode::TruncateTail);
    assert_eq!(style.alignment, TextAlign::Natural);
    assert_eq!(style.font.size, Unit::point(12.0));
}

#[test]
fn test_plain_text_draws_centered_vertically() {
    let commands = draw(TextBox::with_style("hello", style()), &mut env());
    let origins = text_origins(&commands);
    assert_eq!(origins.len(), 1);
    let (text, x, baseline) = &origins[0];
    assert_eq!(text, "hello");
    assert!(approx(*x, 0.0));
    // (100 - 12) / 2 + ascent of 10
    assert!(approx(*baseline, 54.0));
}

#[test]
fn test_alignment_positions_line() {
    let right = TextStyle {
        alignment: TextAlign::Right,
        ..style()
    };
    let origins = text_origins(&draw(TextBox::with_style("abc", right), &mut env()));
    assert!(approx(origins[0].1, 200.0 - 18.0));

    let center = TextStyle {
        alignment: TextAlign::Center,
        ..style()
    };
    let origins = text_origins(&draw(TextBox::with_style("abc", center), &mut env()));
    assert!(approx(origins[0].1, (200.0 - 18.0) / 2.0));
}

#[test]
fn test_natural_alignment_follows_writing_direction() {
    let mut env = env().with_writing_direction(WritingDirection::RightToLeft);
    let origins = text_origins(&draw(TextBox::with_style("abc", style()), &mut env));
    assert!(approx(origins[0].1, 200.0 - 18.0));
}

#[test]
fn test_long_text_is_truncated_to_box_width() {
    let text = "x".repeat(100);
    let origins = text_origins(&draw(TextBox::with_style(text, style()), &mut env()));
    assert_eq!(origins.len(), 1);
    let drawn = &origins[0].0;
    assert!(drawn.ends_with('\u{2026}'));
    assert!(drawn.chars().count() as f32 * 6.0 <= 200.0);
}

#[test]
fn test_word_wrap_draws_several_lines() {
    let wrap = TextStyle {
        line_break: LineBreakMode::WordWrap,
        ..style()
    };
    let text = TextBox::with_style("aaaa bbbb cccc dddd eeee ffff gggg hhhh", wrap)
        .aligned(VerticalAlignment::Top);
    let origins = text_origins(&draw(text, &mut env()));
    assert!(origins.len() > 1);
    for (index, (_, x, baseline)) in origins.iter().enumerate() {
        assert!(approx(*x, 0.0));
        assert!(approx(*baseline, 10.0 + 12.0 * index as f32));
    }
}

#[test]
fn test_styled_spans_keep_their_fonts() {
    let red = Color::rgb(255, 0, 0);
    let styled = StyledText::new(vec![
        TextSpan {
            font: Font::new(Unit::point(10.0)),
            ..TextSpan::new("plain ")
        },
        TextSpan {
            font: Font::new(Unit::point(20.0)).with_face(FontFace::Bold),
            color: red,
            ..TextSpan::new("bold")
        },
    ]);
    let text = TextBox::new(TextContent::Styled(styled)).aligned(VerticalAlignment::Top);
    let commands = draw(text, &mut env());

    let runs: Vec<_> = commands
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText {
                text,
                x,
                font_size,
                face,
                color,
                baseline,
            } => Some((text.as_str(), *x, *font_size, *face, *color, *baseline)),
            _ => None,
        })
        .collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].0, "plain ");
    assert_eq!(runs[1].0, "bold");
    assert!(approx(runs[1].1, 36.0));
    assert!(approx(runs[1].2, 20.0));
    assert_eq!(runs[1].3, FontFace::Bold);
    assert_eq!(runs[1].4, red);
    // The line's ascent comes from its largest font.
    assert!(approx(runs[0].5, 20.0));
    assert!(approx(runs[1].5, 20.0));
}

#[test]
fn test_empty_text_draws_nothing() {
    let commands = draw(TextBox::plain(""), &mut env());
    assert!(commands.is_empty());
}

#[test]
fn test_text_content_deserializes() {
    let content: TextContent =
        serde_json::from_str(r#"{"plain": {"text": "hi", "style": {"alignment": "center"}}}"#)
            .unwrap();
    match content {
        TextContent::Plain { text, style } => {
            assert_eq!(text, "hi");
            assert_eq!(style.alignment, TextAlign::Center);
            assert_eq!(style.line_break, LineBreakMode::TruncateTail);
        }
        TextContent::Styled(_) => panic!("expected plain text"),
    }
}
