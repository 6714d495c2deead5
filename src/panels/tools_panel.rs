use egui::{Button, ComboBox, Slider, Ui};

use crate::components::tool_button::ToolButton;
use crate::config::ToolKind;
use crate::session::DrawingSession;
use crate::shape::Color;
use crate::tools::Tool;

const FONT_FAMILIES: [&str; 4] = ["Arial", "Times New Roman", "Courier New", "Helvetica"];

/// Toolbar, tool settings and history buttons of the drawing window.
/// `label` is the text the next text-tool click will place.
pub fn tools_panel(ui: &mut Ui, session: &mut DrawingSession, label: &mut String) {
    ui.horizontal_wrapped(|ui| {
        let active = session.tool().kind();
        for kind in ToolKind::ALL {
            if ToolButton::new(kind, kind == active).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", kind.label());
                session.select_tool(kind);
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label(format!("{} ({})", session.tool().kind().label(), session.tool().current_state_name()));
        if session.tool().kind().is_multi_point() {
            ui.weak("Click to add points, Enter to finish, Escape to stop");
        }
    });

    ui.separator();
    stroke_settings(ui, session);

    if session.tool().kind() == ToolKind::Text {
        text_settings(ui, session, label);
    }
    if session.tool().kind() == ToolKind::Arrow {
        ui.add(Slider::new(&mut session.settings_mut().arrow_size, 5.0..=30.0).text("Arrow head"));
    }

    grid_settings(ui, session);

    ui.separator();
    ui.horizontal(|ui| {
        if ui.add_enabled(session.can_undo(), Button::new("Undo")).clicked() {
            session.undo();
        }
        if ui.add_enabled(session.can_redo(), Button::new("Redo")).clicked() {
            session.redo();
        }
        if ui
            .add_enabled(!session.scene().is_empty(), Button::new("Clear"))
            .clicked()
        {
            session.clear();
        }
        ui.label(format!("{} shapes", session.scene().len()));
    });

    if let Some((index, shape)) = session.selected() {
        ui.label(format!("Selected #{index}: {}", shape.kind().name()));
    }
}

fn stroke_settings(ui: &mut Ui, session: &mut DrawingSession) {
    let settings = session.settings_mut();

    ui.horizontal(|ui| {
        ui.label("Color");
        let mut color = settings.color.to_color32();
        if ui.color_edit_button_srgba(&mut color).changed() {
            settings.color = Color::from_rgb(color.r(), color.g(), color.b());
        }
        ui.add(Slider::new(&mut settings.line_width, 1.0..=20.0).text("Width"));
    });

    ui.horizontal(|ui| {
        ui.checkbox(&mut settings.fill_enabled, "Fill");
        ui.add_enabled_ui(settings.fill_enabled, |ui| {
            let mut fill = settings.fill_color.to_color32();
            if ui.color_edit_button_srgba(&mut fill).changed() {
                settings.fill_color = Color::from_rgb(fill.r(), fill.g(), fill.b());
            }
        });
    });
}

fn text_settings(ui: &mut Ui, session: &mut DrawingSession, label: &mut String) {
    ui.horizontal(|ui| {
        ui.label("Text");
        ui.text_edit_singleline(label);
    });

    let settings = session.settings_mut();
    ui.horizontal(|ui| {
        ui.add(Slider::new(&mut settings.font_size, 8.0..=72.0).text("Size"));
        ComboBox::from_id_salt("font_family")
            .selected_text(settings.font_family.clone())
            .show_ui(ui, |ui| {
                for family in FONT_FAMILIES {
                    ui.selectable_value(&mut settings.font_family, family.to_string(), family);
                }
            });
    });
}

fn grid_settings(ui: &mut Ui, session: &mut DrawingSession) {
    let settings = session.settings_mut();
    ui.horizontal(|ui| {
        ui.checkbox(&mut settings.show_grid, "Grid");
        ui.checkbox(&mut settings.snap_to_grid, "Snap");
        ui.add(Slider::new(&mut settings.grid_size, 5.0..=100.0).text("Spacing"));
    });
}
