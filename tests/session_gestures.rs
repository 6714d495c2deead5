use egui::{Key, Modifiers, Pos2, pos2, vec2};
use tikz_draw::{DocumentBuffer, DrawingSession, InputEvent, Shape, TextBuffer, ToolKind, ToolSettings};

fn open_session(tool: ToolKind) -> DrawingSession {
    let mut session = DrawingSession::new(ToolSettings::default(), vec2(500.0, 400.0));
    session.open();
    session.select_tool(tool);
    session
}

fn down(session: &mut DrawingSession, at: Pos2) {
    session.handle_event(&InputEvent::PointerDown {
        position: at,
        pressure: 1.0,
    });
}

fn move_to(session: &mut DrawingSession, at: Pos2) {
    session.handle_event(&InputEvent::PointerMove {
        position: at,
        pressure: 1.0,
    });
}

fn up(session: &mut DrawingSession, at: Pos2) {
    session.handle_event(&InputEvent::PointerUp { position: at });
}

fn click(session: &mut DrawingSession, at: Pos2) {
    down(session, at);
    up(session, at);
}

fn press(session: &mut DrawingSession, key: Key) {
    session.handle_event(&InputEvent::KeyDown {
        key,
        modifiers: Modifiers::NONE,
    });
}

#[test]
fn test_two_point_polygon_escape_discards() {
    let mut session = open_session(ToolKind::Polygon);
    click(&mut session, pos2(10.0, 10.0));
    click(&mut session, pos2(80.0, 40.0));
    press(&mut session, Key::Escape);

    assert!(session.scene().is_empty());
    assert!(session.current_shape().is_none());
    assert!(!session.encode().contains("cycle"));
    assert!(!session.can_undo());
}

#[test]
fn test_freehand_decimates_short_moves() {
    let mut session = open_session(ToolKind::Freehand);
    down(&mut session, pos2(0.0, 0.0));
    move_to(&mut session, pos2(10.0, 0.0));
    move_to(&mut session, pos2(13.0, 0.0));
    move_to(&mut session, pos2(16.0, 0.0));
    move_to(&mut session, pos2(26.0, 0.0));

    let points = session.current_shape().and_then(Shape::path_points).unwrap().to_vec();
    assert_eq!(points, vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(16.0, 0.0), pos2(26.0, 0.0)]);

    up(&mut session, pos2(26.0, 0.0));
    let committed = session.scene().shapes()[0].path_points().unwrap();
    assert_eq!(committed.len(), 4);
    assert_eq!(committed.first(), Some(&pos2(0.0, 0.0)));
    assert_eq!(committed.last(), Some(&pos2(26.0, 0.0)));
}

#[test]
fn test_snapping_applies_to_both_corners() {
    let settings = ToolSettings {
        snap_to_grid: true,
        ..Default::default()
    };
    let mut session = DrawingSession::new(settings, vec2(500.0, 400.0));
    session.open();
    session.select_tool(ToolKind::Rectangle);

    down(&mut session, pos2(12.0, 9.0));
    move_to(&mut session, pos2(48.0, 51.0));
    up(&mut session, pos2(48.0, 51.0));

    let Shape::Rectangle(rect) = &session.scene().shapes()[0] else {
        panic!("expected a rectangle");
    };
    assert_eq!(rect.start, pos2(20.0, 0.0));
    assert_eq!(rect.end, pos2(40.0, 60.0));
}

#[test]
fn test_text_tool_uses_prompt() {
    let mut session = DrawingSession::new(ToolSettings::default(), vec2(500.0, 400.0))
        .with_text_prompt(Box::new(|_anchor: Pos2| Some("Hello".to_string())));
    session.open();
    session.select_tool(ToolKind::Text);

    click(&mut session, pos2(100.0, 100.0));

    let Shape::Text(text) = &session.scene().shapes()[0] else {
        panic!("expected a text shape");
    };
    assert_eq!(text.content, "Hello");
    assert_eq!(text.font_size, 16.0);
    assert!(session.encode().contains("{Hello};"));
}

#[test]
fn test_text_tool_without_answer_adds_nothing() {
    let mut session = open_session(ToolKind::Text);
    click(&mut session, pos2(100.0, 100.0));
    assert!(session.scene().is_empty());

    session.set_text_prompt(Some(Box::new(|_anchor: Pos2| Some(String::new()))));
    click(&mut session, pos2(100.0, 100.0));
    assert!(session.scene().is_empty());
}

#[test]
fn test_insert_at_cursor() {
    let mut session = open_session(ToolKind::Arrow);
    down(&mut session, pos2(50.0, 50.0));
    move_to(&mut session, pos2(200.0, 120.0));
    up(&mut session, pos2(200.0, 120.0));

    let mut buffer = DocumentBuffer::new("\\begin{document}\n\\end{document}");
    buffer.set_cursor_char("\\begin{document}\n".len());
    session.insert_into(&mut buffer).unwrap();

    let text = buffer.full_text();
    assert!(text.starts_with("\\begin{document}\n\\begin{tikzpicture}\n"));
    assert!(text.contains("->, >=stealth]"));
    assert!(text.ends_with("\\end{tikzpicture}\\end{document}"));
    assert!(!session.is_open());
}

#[test]
fn test_reopen_starts_empty() {
    let mut session = open_session(ToolKind::Line);
    down(&mut session, pos2(0.0, 0.0));
    move_to(&mut session, pos2(30.0, 30.0));
    up(&mut session, pos2(30.0, 30.0));
    session.close();

    session.open();
    assert!(session.scene().is_empty());
    assert!(!session.can_undo());
    assert_eq!(session.encode(), "% Empty drawing");
}
