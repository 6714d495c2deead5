use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect, TouchPhase};

/// Pointer pressure used when the device reports none.
pub const DEFAULT_PRESSURE: f32 = 1.0;

/// Clamp a reported pressure into `(0, 1]`, falling back to the default for
/// missing or non-positive readings.
pub fn normalize_pressure(pressure: Option<f32>) -> f32 {
    match pressure {
        Some(p) if p > 0.0 && p.is_finite() => p.min(1.0),
        _ => DEFAULT_PRESSURE,
    }
}

/// Canvas input, already translated into canvas-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2, pressure: f32 },
    PointerMove { position: Pos2, pressure: f32 },
    PointerUp { position: Pos2 },
    /// The pointer left the canvas mid-gesture. Treated like a release.
    PointerLeave,
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn position(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown { position, .. }
            | InputEvent::PointerMove { position, .. }
            | InputEvent::PointerUp { position } => Some(*position),
            _ => None,
        }
    }
}

/// Turns raw egui input into [`InputEvent`]s for one canvas.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressing: bool,
    pressure: Option<f32>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    /// Collect this frame's events for the canvas occupying `canvas_rect` on screen.
    /// Key events are forwarded only when `keyboard` is true.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect, keyboard: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

        ctx.input(|input| {
            for event in &input.raw.events {
                match event {
                    egui::Event::Touch { phase, force, .. } => {
                        if matches!(phase, TouchPhase::Start | TouchPhase::Move) {
                            self.pressure = *force;
                        }
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } if keyboard => {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                    _ => {}
                }
            }

            let pressure = normalize_pressure(self.pressure);
            let pos = input.pointer.interact_pos();

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pos.filter(|p| canvas_rect.contains(*p)) {
                    self.pressing = true;
                    events.push(InputEvent::PointerDown {
                        position: to_local(pos),
                        pressure,
                    });
                }
            }

            if self.pressing {
                match pos {
                    Some(pos) if !canvas_rect.contains(pos) => {
                        self.pressing = false;
                        events.push(InputEvent::PointerLeave);
                    }
                    Some(pos) if Some(pos) != self.last_pointer_pos => {
                        events.push(InputEvent::PointerMove {
                            position: to_local(pos),
                            pressure,
                        });
                    }
                    None => {
                        self.pressing = false;
                        events.push(InputEvent::PointerLeave);
                    }
                    _ => {}
                }
            }

            if self.pressing && input.pointer.button_released(PointerButton::Primary) {
                self.pressing = false;
                let position = pos.or(self.last_pointer_pos).map(to_local).unwrap_or_default();
                events.push(InputEvent::PointerUp { position });
            }

            self.last_pointer_pos = pos;
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_pressure_defaults_and_clamps() {
        assert_eq!(normalize_pressure(None), 1.0);
        assert_eq!(normalize_pressure(Some(0.0)), 1.0);
        assert_eq!(normalize_pressure(Some(-0.5)), 1.0);
        assert_eq!(normalize_pressure(Some(0.4)), 0.4);
        assert_eq!(normalize_pressure(Some(3.0)), 1.0);
    }

    #[test]
    fn test_event_position() {
        let down = InputEvent::PointerDown {
            position: pos2(1.0, 2.0),
            pressure: 1.0,
        };
        assert_eq!(down.position(), Some(pos2(1.0, 2.0)));
        assert_eq!(InputEvent::PointerLeave.position(), None);
    }
}
