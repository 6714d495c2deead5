use egui::{Color32, CursorIcon, Sense, Stroke, Ui};

use crate::geometry::calculate_bounds;
use crate::input::InputHandler;
use crate::session::DrawingSession;
use crate::surface::PainterSurface;

/// The drawing canvas: feeds pointer and key input to the session and
/// repaints the scene.
pub fn canvas_panel(ui: &mut Ui, session: &mut DrawingSession, input: &mut InputHandler) {
    let (response, painter) = ui.allocate_painter(session.canvas_size(), Sense::click_and_drag());
    let rect = response.rect;
    let painter = painter.with_clip_rect(rect);
    painter.rect_filled(rect, 0.0, Color32::WHITE);

    if response.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
    }

    let keyboard = !ui.ctx().wants_keyboard_input();
    for event in input.process_input(ui.ctx(), rect, keyboard) {
        session.handle_event(&event);
    }

    let mut surface = PainterSurface::new(&painter, rect);
    session.render(&mut surface);

    if let Some(bounds) = session
        .selected()
        .and_then(|(_, shape)| calculate_bounds(&shape.extent_points()))
    {
        let outline = bounds.translate(rect.min.to_vec2()).expand(4.0);
        painter.rect_stroke(outline, 2.0, Stroke::new(1.0, Color32::from_rgb(33, 150, 243)));
    }

    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::GRAY));
}
