use egui::{Color32, ScrollArea, Sense, Stroke, Ui, vec2};

use crate::surface::PainterSurface;
use crate::tikz::{extract_tikz_blocks, render_tikz};

const PREVIEW_HEIGHT: f32 = 220.0;

/// Renders every `tikzpicture` in `document`, one box per picture.
pub fn preview_panel(ui: &mut Ui, document: &str) {
    ui.heading("Preview");

    let blocks = extract_tikz_blocks(document);
    if blocks.is_empty() {
        ui.weak("No tikzpicture in the document");
        return;
    }

    ScrollArea::vertical().show(ui, |ui| {
        for (index, block) in blocks.iter().enumerate() {
            let size = vec2(ui.available_width(), PREVIEW_HEIGHT);
            let (response, painter) = ui.allocate_painter(size, Sense::hover());
            let rect = response.rect;
            let painter = painter.with_clip_rect(rect);

            let mut surface = PainterSurface::new(&painter, rect);
            let drawn = render_tikz(&mut surface, block);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::GRAY));

            ui.weak(format!("Figure {}: {drawn} elements", index + 1));
            ui.add_space(8.0);
        }
    });
}
