use egui::{pos2, vec2};
use tikz_draw::history::MAX_HISTORY_SIZE;
use tikz_draw::{DrawingSession, HistoryManager, HistorySink, InputEvent, Shape, ToolKind, ToolSettings};

fn draw_line(session: &mut DrawingSession, offset: f32) {
    session.handle_event(&InputEvent::PointerDown {
        position: pos2(offset, 10.0),
        pressure: 1.0,
    });
    session.handle_event(&InputEvent::PointerMove {
        position: pos2(offset + 20.0, 40.0),
        pressure: 1.0,
    });
    session.handle_event(&InputEvent::PointerUp {
        position: pos2(offset + 20.0, 40.0),
    });
}

fn line_session() -> DrawingSession {
    let mut session = DrawingSession::new(ToolSettings::default(), vec2(500.0, 400.0));
    session.open();
    session.select_tool(ToolKind::Line);
    session
}

#[test]
fn test_undo_all_then_redo_all() {
    let mut session = line_session();
    for i in 0..6 {
        draw_line(&mut session, i as f32 * 30.0);
    }
    let final_state: Vec<Shape> = session.scene().snapshot();

    for _ in 0..6 {
        session.undo();
    }
    assert!(session.scene().is_empty());
    assert!(!session.can_undo());

    // Extra undos are no-ops.
    session.undo();
    assert!(session.scene().is_empty());

    for _ in 0..6 {
        session.redo();
    }
    assert_eq!(session.scene().shapes(), final_state.as_slice());
    assert!(!session.can_redo());
}

#[test]
fn test_new_commit_drops_redo() {
    let mut session = line_session();
    draw_line(&mut session, 0.0);
    draw_line(&mut session, 30.0);
    session.undo();
    assert!(session.can_redo());

    draw_line(&mut session, 60.0);
    assert!(!session.can_redo());
    assert_eq!(session.scene().len(), 2);
}

#[test]
fn test_history_keeps_last_fifty() {
    let mut session = line_session();
    let total = MAX_HISTORY_SIZE + 10;
    for i in 0..total {
        draw_line(&mut session, i as f32);
    }

    let mut undone = 0;
    while session.can_undo() {
        session.undo();
        undone += 1;
    }
    assert_eq!(undone, MAX_HISTORY_SIZE);
    assert_eq!(session.scene().len(), total - MAX_HISTORY_SIZE);
}

#[test]
fn test_snapshots_are_independent() {
    let mut history = HistoryManager::default();
    let mut session = line_session();
    draw_line(&mut session, 0.0);

    let mut shapes = session.scene().snapshot();
    history.save_state(&shapes);
    shapes.clear();

    history.save_state(&[]);
    let restored = history.undo().unwrap();
    assert_eq!(restored.len(), 1);
}
