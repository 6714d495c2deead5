use egui::{ScrollArea, TextEdit, Ui};

use crate::text_buffer::DocumentBuffer;

/// The LaTeX source editor. Tracks the caret so drawings land where the
/// user was typing.
pub fn central_panel(ui: &mut Ui, document: &mut DocumentBuffer) {
    ScrollArea::vertical().show(ui, |ui| {
        let output = TextEdit::multiline(document.text_mut())
            .code_editor()
            .desired_width(f32::INFINITY)
            .desired_rows(30)
            .show(ui);

        if let Some(range) = output.cursor_range {
            document.set_cursor_char(range.primary.ccursor.index);
        }
    });
}
